use thiserror::Error;

/// Violations of the graph's structural invariants.
///
/// These are prevented proactively at the mutation site (connect, drop,
/// load), so a well-behaved caller never observes a graph that contains
/// a self-loop, a duplicate link, or a dangling reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error(
        "Step '{step_id}' lists successor '{missing_id}', which is not present in the workflow"
    )]
    DanglingSuccessor { step_id: String, missing_id: String },

    #[error("Node '{node_id}' cannot be connected to itself")]
    SelfLoop { node_id: String },

    #[error("An edge from '{source_id}' to '{target_id}' already exists")]
    DuplicateEdge {
        source_id: String,
        target_id: String,
    },

    #[error("Node '{0}' not found in the graph")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found in the graph")]
    EdgeNotFound(String),
}

/// Failures reported by the persistence backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Workflow '{0}' was not found")]
    NotFound(String),

    #[error("The backend rejected the workflow: {0}")]
    Validation(String),

    #[error("Network failure: {0}")]
    Network(String),

    #[error("The session is no longer authorized")]
    Unauthorized,
}

/// Errors raised by the interaction controller itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("A save request is already in flight")]
    SaveInFlight,

    #[error("No node is selected")]
    NoSelection,

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
