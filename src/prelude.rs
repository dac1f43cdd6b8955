//! Prelude module for convenient imports
//!
//! Re-exports the types needed to open, edit, and persist a workflow
//! without importing each module individually.

// Editor surface
pub use crate::editor::controller::InteractionController;
pub use crate::editor::keyboard::{Key, KeyEvent, Shortcut, shortcut_for};
pub use crate::editor::state::EditorState;

// Graph model and conversion
pub use crate::graph::{Edge, GraphModel, Node, graph_to_steps, steps_to_graph};

// Undo/redo engine
pub use crate::history::SnapshotHistory;

// Wire schema
pub use crate::step::{Position, Step, WorkflowDefinition, WorkflowMetadata, WorkflowStatus};

// Persistence boundary
pub use crate::persistence::{ExecutionHandle, PersistenceAdapter, SaveRequest};

// Error types
pub use crate::error::{EditorError, GraphError, PersistenceError};

// Result type alias for convenience. The defaulted error parameter keeps
// two-parameter `Result<T, E>` signatures working under a glob import.
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
