pub mod convert;
pub mod model;

pub use convert::*;
pub use model::*;
