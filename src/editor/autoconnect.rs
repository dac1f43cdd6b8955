//! Proximity heuristic that wires a freshly dropped node to its nearest
//! qualifying predecessor, so a linear pipeline can be built purely by
//! dropping steps in visual reading order.

use crate::graph::GraphModel;
use crate::step::Position;

/// Approximate rendered node height. Distances are measured from a
/// candidate's bottom edge rather than its origin.
pub const NODE_HEIGHT: f64 = 60.0;

/// Maximum distance at which a dropped node snaps to a predecessor.
pub const SNAP_DISTANCE: f64 = 150.0;

/// Picks the nearest node strictly above `drop` whose bottom edge lies
/// within [`SNAP_DISTANCE`]. Returns `None` when no candidate qualifies:
/// dropping far from the chain simply creates an unconnected node.
pub fn nearest_predecessor(graph: &GraphModel, drop: Position) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;
    for node in &graph.nodes {
        if node.position.y >= drop.y {
            continue;
        }
        let dx = node.position.x - drop.x;
        let dy = node.position.y + NODE_HEIGHT - drop.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance > SNAP_DISTANCE {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((node.id.as_str(), distance));
        }
    }
    best.map(|(id, _)| id)
}
