pub mod autoconnect;
pub mod controller;
pub mod keyboard;
pub mod state;

pub use autoconnect::*;
pub use controller::*;
pub use keyboard::*;
pub use state::*;
