//! The in-memory visual model: one node per step, one edge per successor
//! link. The model owns no backend identity; it is a derived, disposable
//! view reconstructed from steps on load and flattened back on save.

use ahash::AHashMap;

use crate::error::GraphError;
use crate::step::Position;

/// The on-canvas representation of a [`Step`](crate::step::Step).
///
/// Node identity is stable across edits; only its fields and its
/// membership in the node set change.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: String,
    pub label: String,
    pub position: Position,
    pub config: AHashMap<String, serde_json::Value>,
    pub selected: bool,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        label: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            label: label.into(),
            position,
            config: AHashMap::new(),
            selected: false,
        }
    }
}

/// The on-canvas representation of a successor link between two steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub selected: bool,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            selected: false,
        }
    }

    /// Deterministic id for edges materialized from stored successor lists.
    /// User-drawn connections get freshly generated ids instead. The
    /// source id's length prefixes the pair: step ids may contain `-`
    /// themselves, and a plain join would let distinct pairs collide.
    pub fn derived_id(source: &str, target: &str) -> String {
        format!("e{}-{}-{}", source.len(), source, target)
    }
}

/// The live node and edge sets of one open workflow.
///
/// Both collections preserve insertion order, which makes repeated
/// serializations of an unmodified graph byte-identical. Lookups are
/// linear scans: graphs are small and human-authored. `Clone` produces
/// the deep copy used for history snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphModel {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphModel {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn edge_mut(&mut self, id: &str) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.id == id)
    }

    pub fn has_edge_between(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }

    /// Checks the connection rule without mutating: both endpoints must
    /// exist, source and target must differ, and the pair must be new.
    pub fn can_connect(&self, source: &str, target: &str) -> Result<(), GraphError> {
        if source == target {
            return Err(GraphError::SelfLoop {
                node_id: source.to_string(),
            });
        }
        for endpoint in [source, target] {
            if self.node(endpoint).is_none() {
                return Err(GraphError::NodeNotFound(endpoint.to_string()));
            }
        }
        if self.has_edge_between(source, target) {
            return Err(GraphError::DuplicateEdge {
                source_id: source.to_string(),
                target_id: target.to_string(),
            });
        }
        Ok(())
    }

    /// Adds an edge after validating the connection rule.
    pub fn connect(
        &mut self,
        id: impl Into<String>,
        source: &str,
        target: &str,
    ) -> Result<(), GraphError> {
        self.can_connect(source, target)?;
        self.edges.push(Edge::new(id, source, target));
        Ok(())
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) -> Result<(), GraphError> {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return Err(GraphError::NodeNotFound(id.to_string()));
        }
        self.edges.retain(|e| e.source != id && e.target != id);
        Ok(())
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<(), GraphError> {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        if self.edges.len() == before {
            return Err(GraphError::EdgeNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn has_selection(&self) -> bool {
        self.nodes.iter().any(|n| n.selected) || self.edges.iter().any(|e| e.selected)
    }

    /// Removes every selected node, every selected edge, and every edge
    /// touching a removed node. One atomic cascade.
    pub fn remove_selected(&mut self) {
        let removed: Vec<String> = self
            .nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id.clone())
            .collect();
        self.nodes.retain(|n| !n.selected);
        self.edges.retain(|e| {
            !e.selected && !removed.contains(&e.source) && !removed.contains(&e.target)
        });
    }

    pub fn clear_selection(&mut self) {
        for node in &mut self.nodes {
            node.selected = false;
        }
        for edge in &mut self.edges {
            edge.selected = false;
        }
    }
}
