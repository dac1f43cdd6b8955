//! Binds pointer, keyboard, and drag interactions to model mutations.
//!
//! The controller owns the one live [`GraphModel`] (renderers read it
//! through [`graph`](InteractionController::graph)) plus the snapshot
//! history, and wraps every mutating action in a history push. All
//! mutations are synchronous, in-memory, and cannot fail; only the
//! persistence calls can, and a failure there leaves the graph, the
//! history, and the dirty flag untouched.

use std::time::{SystemTime, UNIX_EPOCH};

use ahash::AHashMap;
use tracing::{debug, warn};

use super::autoconnect::nearest_predecessor;
use super::keyboard::{KeyEvent, Shortcut, shortcut_for};
use super::state::EditorState;
use crate::error::{EditorError, GraphError, PersistenceError};
use crate::graph::{GraphModel, Node, cascade_position, graph_to_steps, steps_to_graph};
use crate::history::SnapshotHistory;
use crate::persistence::{ExecutionHandle, PersistenceAdapter, SaveRequest};
use crate::step::{Position, WorkflowDefinition, WorkflowMetadata, WorkflowStatus};

/// Pre-drag state stashed at drag start and committed to history on drop,
/// so a node move costs one undo level instead of one per pointer frame.
#[derive(Debug)]
struct NodeDrag {
    node_id: String,
    origin: GraphModel,
}

pub struct InteractionController {
    workflow_id: String,
    name: String,
    description: String,
    status: WorkflowStatus,
    variables: AHashMap<String, serde_json::Value>,
    graph: GraphModel,
    history: SnapshotHistory,
    state: EditorState,
    dirty: bool,
    help_visible: bool,
    node_drag: Option<NodeDrag>,
    /// The serialization handed out by `begin_save`, kept until the
    /// outcome arrives. Doubles as the in-flight guard and as the
    /// baseline for deciding whether edits happened mid-save.
    pending_save: Option<SaveRequest>,
    /// Monotonic per-session counter, combined with a millisecond
    /// timestamp so generated ids never collide across sessions.
    next_seq: u64,
}

impl InteractionController {
    /// Opens an editor over an already-fetched workflow definition.
    pub fn open(
        workflow_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        definition: WorkflowDefinition,
    ) -> Result<Self, GraphError> {
        let graph = steps_to_graph(&definition.steps)?;
        Ok(Self {
            workflow_id: workflow_id.into(),
            name: name.into(),
            description: description.into(),
            status: WorkflowStatus::Draft,
            variables: definition.variables,
            graph,
            history: SnapshotHistory::new(),
            state: EditorState::Idle,
            dirty: false,
            help_visible: false,
            node_drag: None,
            pending_save: None,
            next_seq: 1,
        })
    }

    /// Fetches the definition through the adapter and opens it. A failed
    /// load leaves nothing to edit; the caller redirects away.
    pub fn load(
        adapter: &dyn PersistenceAdapter,
        workflow_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, EditorError> {
        let workflow_id = workflow_id.into();
        let definition = adapter.load(&workflow_id)?;
        Ok(Self::open(workflow_id, name, description, definition)?)
    }

    // --- read surface ---

    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// The single live graph. Renderers and the controller read the same
    /// state synchronously; there is no shadow copy to drift.
    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn variables(&self) -> &AHashMap<String, serde_json::Value> {
        &self.variables
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// True when unsaved local edits exist relative to the last
    /// successful save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    // --- node and edge mutations ---

    /// Adds a step node. With a drop position the auto-connect heuristic
    /// may wire it to the nearest predecessor above; palette adds (no
    /// coordinate) fall into the vertical cascade and never auto-connect.
    /// Returns the new node's id.
    pub fn add_node(&mut self, kind: &str, drop_at: Option<Position>) -> String {
        self.history.push(&self.graph);

        let seq = self.next_seq;
        self.next_seq += 1;
        let node_id = format!("step-{}-{}", now_millis(), seq);
        let label = format!("{} {}", kind, seq);
        let position = drop_at.unwrap_or_else(|| cascade_position(self.graph.nodes.len()));

        let predecessor = drop_at
            .and_then(|at| nearest_predecessor(&self.graph, at))
            .map(str::to_owned);

        self.graph
            .nodes
            .push(Node::new(&node_id, kind, label, position));

        if let Some(source) = predecessor {
            let edge_id = self.fresh_edge_id();
            // Cannot fail: the target is brand new, so no duplicate or
            // self-loop is possible.
            let _ = self.graph.connect(edge_id, &source, &node_id);
            debug!(%source, target = %node_id, "auto-connected dropped node");
        }

        self.dirty = true;
        debug!(%node_id, %kind, "added node");
        node_id
    }

    /// Creates an edge drawn by hand between two nodes' handles.
    /// Self-loops and duplicate pairs are rejected before any snapshot
    /// is taken, so failed attempts leave both graph and history as-is.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<String, GraphError> {
        self.graph.can_connect(source, target)?;
        self.history.push(&self.graph);
        let edge_id = self.fresh_edge_id();
        self.graph.connect(&edge_id, source, target)?;
        self.dirty = true;
        debug!(%source, %target, "connected nodes");
        Ok(edge_id)
    }

    /// Selects a node; the configuration panel binds to it. A
    /// non-additive select replaces the previous selection.
    pub fn select_node(&mut self, node_id: &str, additive: bool) -> Result<(), GraphError> {
        if self.graph.node(node_id).is_none() {
            return Err(GraphError::NodeNotFound(node_id.to_string()));
        }
        if !additive {
            self.graph.clear_selection();
        }
        if let Some(node) = self.graph.node_mut(node_id) {
            node.selected = true;
        }
        self.state = EditorState::NodeSelected {
            node_id: node_id.to_string(),
        };
        Ok(())
    }

    pub fn select_edge(&mut self, edge_id: &str, additive: bool) -> Result<(), GraphError> {
        if self.graph.edge(edge_id).is_none() {
            return Err(GraphError::EdgeNotFound(edge_id.to_string()));
        }
        if !additive {
            self.graph.clear_selection();
            if matches!(self.state, EditorState::NodeSelected { .. }) {
                self.state = EditorState::Idle;
            }
        }
        if let Some(edge) = self.graph.edge_mut(edge_id) {
            edge.selected = true;
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.graph.clear_selection();
        if matches!(self.state, EditorState::NodeSelected { .. }) {
            self.state = EditorState::Idle;
        }
    }

    /// Deletes every selected node and edge, cascading to edges that
    /// touch a removed node. One atomic operation, one undo level.
    /// A no-op (no snapshot) when nothing is selected.
    pub fn delete_selection(&mut self) {
        if !self.graph.has_selection() {
            return;
        }
        self.history.push(&self.graph);
        self.graph.remove_selected();
        self.dirty = true;
        self.reconcile_selection();
        debug!("deleted selection");
    }

    /// Deletes one edge via its own delete control. The edge component
    /// reaches the controller through an explicit callback, decoupled
    /// from node selection state.
    pub fn request_edge_delete(&mut self, edge_id: &str) -> Result<(), GraphError> {
        if self.graph.edge(edge_id).is_none() {
            return Err(GraphError::EdgeNotFound(edge_id.to_string()));
        }
        self.history.push(&self.graph);
        // Lookup above guarantees this succeeds.
        self.graph.remove_edge(edge_id)?;
        self.dirty = true;
        debug!(%edge_id, "deleted edge");
        Ok(())
    }

    // --- node movement ---

    /// Starts a node move, stashing the pre-drag state. Intermediate
    /// pointer frames go through [`drag_node_to`](Self::drag_node_to)
    /// without touching history.
    pub fn begin_node_drag(&mut self, node_id: &str) -> Result<(), GraphError> {
        if self.graph.node(node_id).is_none() {
            return Err(GraphError::NodeNotFound(node_id.to_string()));
        }
        self.node_drag = Some(NodeDrag {
            node_id: node_id.to_string(),
            origin: self.graph.clone(),
        });
        Ok(())
    }

    /// Updates the dragged node's position for the current pointer frame.
    pub fn drag_node_to(&mut self, position: Position) {
        let Some(drag) = &self.node_drag else { return };
        let node_id = drag.node_id.clone();
        if let Some(node) = self.graph.node_mut(&node_id) {
            node.position = position;
        }
    }

    /// Settles the move. Only now is the pre-drag snapshot committed, so
    /// the whole drag is one undo level; a drag that went nowhere leaves
    /// history and the dirty flag untouched.
    pub fn end_node_drag(&mut self) {
        let Some(drag) = self.node_drag.take() else { return };
        if self.graph != drag.origin {
            self.history.push_owned(drag.origin);
            self.dirty = true;
        }
    }

    // --- palette and panels ---

    pub fn open_palette(&mut self) {
        self.state = EditorState::PaletteOpen;
    }

    /// Starts dragging a task-type token out of the palette.
    pub fn begin_palette_drag(&mut self, kind: impl Into<String>) {
        self.state = EditorState::Dragging { kind: kind.into() };
    }

    /// Drops the dragged palette token onto the canvas, creating (and
    /// possibly auto-connecting) a node. Returns the new node id, or
    /// `None` if no palette drag was in progress.
    pub fn drop_palette_payload(&mut self, at: Position) -> Option<String> {
        let EditorState::Dragging { kind } = self.state.clone() else {
            return None;
        };
        self.state = EditorState::Idle;
        Some(self.add_node(&kind, Some(at)))
    }

    /// Escape: closes whatever panel is open. An in-flight save cannot
    /// be cancelled and is left alone.
    pub fn close_panel(&mut self) {
        self.help_visible = false;
        match self.state {
            EditorState::PaletteOpen
            | EditorState::NodeSelected { .. }
            | EditorState::Dragging { .. } => {
                self.graph.clear_selection();
                self.state = EditorState::Idle;
            }
            EditorState::Idle | EditorState::Saving => {}
        }
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Commits the side panel's edits to the selected node. Closing the
    /// panel without applying mutates nothing.
    pub fn apply_configure(
        &mut self,
        label: impl Into<String>,
        config: AHashMap<String, serde_json::Value>,
    ) -> Result<(), EditorError> {
        let node_id = self
            .state
            .selected_node()
            .ok_or(EditorError::NoSelection)?
            .to_string();
        self.history.push(&self.graph);
        if let Some(node) = self.graph.node_mut(&node_id) {
            node.label = label.into();
            node.config = config;
        }
        self.dirty = true;
        debug!(%node_id, "configured node");
        Ok(())
    }

    // --- workflow metadata ---

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.name {
            self.name = name;
            self.dirty = true;
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        if description != self.description {
            self.description = description;
            self.dirty = true;
        }
    }

    pub fn set_variable(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.variables.insert(key.into(), value);
        self.dirty = true;
    }

    // --- undo / redo ---

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(&self.graph) else {
            return false;
        };
        self.graph = previous;
        self.dirty = true;
        self.reconcile_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(&self.graph) else {
            return false;
        };
        self.graph = next;
        self.dirty = true;
        self.reconcile_selection();
        true
    }

    // --- keyboard ---

    /// Dispatches a key event. Local shortcuts (undo, redo, delete,
    /// escape, help) are applied immediately; `Save` is returned to the
    /// caller, which owns the transport. Returns the recognized shortcut,
    /// or `None` when the chord is unknown or a text input has focus.
    pub fn handle_key(&mut self, event: &KeyEvent, text_input_focused: bool) -> Option<Shortcut> {
        let shortcut = shortcut_for(event, text_input_focused)?;
        match shortcut {
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
            Shortcut::DeleteSelection => self.delete_selection(),
            Shortcut::ClosePanel => self.close_panel(),
            Shortcut::ToggleHelp => self.toggle_help(),
            Shortcut::Save => {}
        }
        Some(shortcut)
    }

    // --- persistence ---

    /// Serializes the current state and marks a save as in flight.
    /// The editor stays fully editable; the request is a point-in-time
    /// copy that later edits do not alter. A second `begin_save` while
    /// one is pending is refused.
    pub fn begin_save(&mut self) -> Result<SaveRequest, EditorError> {
        if self.pending_save.is_some() {
            return Err(EditorError::SaveInFlight);
        }
        let request = self.snapshot_request();
        self.pending_save = Some(request.clone());
        self.state = EditorState::Saving;
        Ok(request)
    }

    /// Applies the outcome of an issued save. Success clears the dirty
    /// flag, unless the user kept editing during the round trip, in
    /// which case the newer edits are still unsaved and `dirty` stays
    /// set. Failure changes nothing, so the same state remains undo-able
    /// and re-save-able. The echoed server copy never overwrites live
    /// in-memory edits.
    ///
    /// An outcome arriving while no save is in flight (a duplicate or
    /// stale response) is passed through without touching any local
    /// state.
    pub fn complete_save(
        &mut self,
        outcome: Result<WorkflowMetadata, PersistenceError>,
    ) -> Result<WorkflowMetadata, PersistenceError> {
        let Some(baseline) = self.pending_save.take() else {
            warn!(workflow_id = %self.workflow_id, "ignoring save outcome with no save in flight");
            return outcome;
        };
        if self.state.is_saving() {
            self.state = EditorState::Idle;
        }
        match outcome {
            Ok(metadata) => {
                self.dirty = baseline != self.snapshot_request();
                debug!(workflow_id = %self.workflow_id, dirty = self.dirty, "saved workflow");
                Ok(metadata)
            }
            Err(error) => {
                warn!(workflow_id = %self.workflow_id, %error, "save failed; keeping dirty state");
                Err(error)
            }
        }
    }

    /// Convenience wrapper running both save phases against a synchronous
    /// adapter.
    pub fn save(
        &mut self,
        adapter: &mut dyn PersistenceAdapter,
    ) -> Result<WorkflowMetadata, EditorError> {
        let request = self.begin_save()?;
        let outcome = adapter.save(&request);
        Ok(self.complete_save(outcome)?)
    }

    /// Publishes the workflow. Success replaces the tracked status; the
    /// live graph and any unsaved edits are left untouched. Failure
    /// leaves the prior status in place.
    pub fn publish(
        &mut self,
        adapter: &mut dyn PersistenceAdapter,
    ) -> Result<WorkflowMetadata, PersistenceError> {
        let metadata = adapter.publish(&self.workflow_id)?;
        self.status = metadata.status;
        Ok(metadata)
    }

    /// Starts a run of the workflow. Purely delegating; no local state
    /// changes either way.
    pub fn execute(
        &mut self,
        adapter: &mut dyn PersistenceAdapter,
    ) -> Result<ExecutionHandle, PersistenceError> {
        adapter.execute(&self.workflow_id)
    }

    // --- internals ---

    /// Point-in-time serialization of everything a save persists.
    fn snapshot_request(&self) -> SaveRequest {
        SaveRequest {
            workflow_id: self.workflow_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            definition: WorkflowDefinition {
                steps: graph_to_steps(&self.graph),
                variables: self.variables.clone(),
            },
        }
    }

    fn fresh_edge_id(&mut self) -> String {
        let seq = self.next_seq;
        self.next_seq += 1;
        format!("edge-{}-{}", now_millis(), seq)
    }

    /// Drops a config-panel binding whose node no longer exists, e.g.
    /// after a deletion or an undo past the node's creation.
    fn reconcile_selection(&mut self) {
        let stale = match &self.state {
            EditorState::NodeSelected { node_id } => self.graph.node(node_id).is_none(),
            _ => false,
        };
        if stale {
            self.state = EditorState::Idle;
        }
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
