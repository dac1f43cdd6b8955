//! The backend boundary. The editor core never talks HTTP itself; it
//! serializes a point-in-time [`SaveRequest`] and hands it to whatever
//! transport the host application wires in.

use crate::error::PersistenceError;
use crate::step::{WorkflowDefinition, WorkflowMetadata};

/// Opaque handle identifying a run started by [`PersistenceAdapter::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionHandle(pub String);

/// Point-in-time serialization of the editor's state, produced by
/// `begin_save`. Later edits do not alter an already-issued request.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub workflow_id: String,
    pub name: String,
    pub description: String,
    pub definition: WorkflowDefinition,
}

/// Contract of the platform's persistence layer.
///
/// Implementations typically wrap a REST client; tests substitute an
/// in-memory recorder. Failures must be reported through
/// [`PersistenceError`]. The controller guarantees a failed call leaves
/// the in-memory graph, history, and dirty flag untouched.
pub trait PersistenceAdapter {
    /// Fetches a workflow definition. Fails with
    /// [`PersistenceError::NotFound`] for unknown ids.
    fn load(&self, workflow_id: &str) -> Result<WorkflowDefinition, PersistenceError>;

    /// Persists the given serialization, returning updated metadata.
    fn save(&mut self, request: &SaveRequest) -> Result<WorkflowMetadata, PersistenceError>;

    /// Transitions the workflow to its published status.
    fn publish(&mut self, workflow_id: &str) -> Result<WorkflowMetadata, PersistenceError>;

    /// Starts a run of the workflow.
    fn execute(&mut self, workflow_id: &str) -> Result<ExecutionHandle, PersistenceError>;
}
