//! Bidirectional mapping between the backend's ordered step list and the
//! canvas graph. Both directions are pure; `graph_to_steps` preserves
//! node order so repeated saves without edits are byte-identical.

use ahash::AHashSet;
use itertools::Itertools;

use super::model::{Edge, GraphModel, Node};
use crate::error::GraphError;
use crate::step::{Position, Step};

/// Horizontal anchor for steps stored without a layout hint.
const CASCADE_X: f64 = 250.0;
/// Vertical origin of the fallback cascade.
const CASCADE_TOP: f64 = 80.0;
/// Vertical spacing of the fallback cascade, chosen so stacked nodes
/// never fully overlap.
const CASCADE_SPACING: f64 = 120.0;

/// Default layout slot for the `index`-th node placed without coordinates.
pub fn cascade_position(index: usize) -> Position {
    Position::new(CASCADE_X, CASCADE_TOP + index as f64 * CASCADE_SPACING)
}

/// Materializes the visual graph for a stored step list.
///
/// Steps without a position fall into a vertical cascade. A successor id
/// that references no step in the collection is a data-integrity error.
pub fn steps_to_graph(steps: &[Step]) -> Result<GraphModel, GraphError> {
    let known: AHashSet<&str> = steps.iter().map(|s| s.id.as_str()).collect();

    let mut graph = GraphModel::default();
    for (index, step) in steps.iter().enumerate() {
        let position = step.position.unwrap_or_else(|| cascade_position(index));
        let mut node = Node::new(&step.id, &step.kind, &step.name, position);
        node.config = step.config.clone();
        graph.nodes.push(node);
    }

    for step in steps {
        for successor in step.next.iter().flatten() {
            if !known.contains(successor.as_str()) {
                return Err(GraphError::DanglingSuccessor {
                    step_id: step.id.clone(),
                    missing_id: successor.clone(),
                });
            }
            graph
                .edges
                .push(Edge::new(Edge::derived_id(&step.id, successor), &step.id, successor));
        }
    }

    Ok(graph)
}

/// Flattens the graph back into the backend's step list.
///
/// Outgoing edge targets become `next`, in edge insertion order; the
/// field is omitted entirely for terminal nodes to avoid meaningless
/// diffs. Current canvas positions are carried through unchanged.
pub fn graph_to_steps(graph: &GraphModel) -> Vec<Step> {
    let mut outgoing = graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.clone()))
        .into_group_map();

    graph
        .nodes
        .iter()
        .map(|node| Step {
            id: node.id.clone(),
            kind: node.kind.clone(),
            name: node.label.clone(),
            config: node.config.clone(),
            next: outgoing.remove(node.id.as_str()),
            position: Some(node.position),
        })
        .collect()
}
