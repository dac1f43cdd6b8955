//! Tests for the snapshot-based undo/redo engine.
mod common;

use flowcanvas::history::{MAX_DEPTH, SnapshotHistory};
use flowcanvas::prelude::*;

/// A graph with `count` nodes, distinct per count.
fn graph_with(count: usize) -> GraphModel {
    let mut graph = GraphModel::default();
    for index in 0..count {
        graph.nodes.push(Node::new(
            format!("n{}", index),
            "task",
            format!("Step {}", index),
            Position::new(250.0, 50.0 + index as f64 * 120.0),
        ));
    }
    graph
}

/// Property 2: N undos return to the pre-op1 state, N redos to the
/// post-opN state.
#[test]
fn undo_redo_inverse_law() {
    let mut history = SnapshotHistory::new();
    let mut current = graph_with(0);

    for next in 1..=5 {
        history.push(&current);
        current = graph_with(next);
    }
    let final_state = current.clone();

    for _ in 0..5 {
        current = history.undo(&current).unwrap();
    }
    assert_eq!(current, graph_with(0));
    assert!(!history.can_undo());

    for _ in 0..5 {
        current = history.redo(&current).unwrap();
    }
    assert_eq!(current, final_state);
    assert!(!history.can_redo());
}

/// Property 3: after MAX_DEPTH + k pushes only MAX_DEPTH snapshots
/// remain and the oldest k are unrecoverable.
#[test]
fn history_is_bounded_and_evicts_oldest() {
    let mut history = SnapshotHistory::new();
    let mut current = graph_with(0);

    let total = MAX_DEPTH + 5;
    for next in 1..=total {
        history.push(&current);
        current = graph_with(next);
    }
    assert_eq!(history.depth(), MAX_DEPTH);

    let mut undos = 0;
    while let Some(previous) = history.undo(&current) {
        current = previous;
        undos += 1;
    }
    assert_eq!(undos, MAX_DEPTH);
    // The oldest recoverable state is the one right after the evicted
    // prefix, not the empty graph.
    assert_eq!(current, graph_with(5));
}

/// Property 4: a push after an undo discards the redo branch for good.
#[test]
fn push_invalidates_redo() {
    let mut history = SnapshotHistory::new();
    let mut current = graph_with(0);

    history.push(&current);
    current = graph_with(1);
    current = history.undo(&current).unwrap();
    assert!(history.can_redo());

    // A different edit branches off; the old future is gone.
    history.push(&current);
    current = graph_with(2);
    assert!(!history.can_redo());
    assert!(history.redo(&current).is_none());
}

#[test]
fn undo_on_empty_history_is_a_noop() {
    let mut history = SnapshotHistory::new();
    let current = graph_with(1);
    assert!(!history.can_undo());
    assert!(history.undo(&current).is_none());
    assert!(!history.can_undo());
}

/// Snapshots are deep copies: mutating the live graph after a push must
/// not retroactively alter history.
#[test]
fn snapshots_do_not_alias_the_live_graph() {
    let mut history = SnapshotHistory::new();
    let mut current = graph_with(1);

    history.push(&current);
    current.node_mut("n0").unwrap().label = "Renamed".to_string();

    let restored = history.undo(&current).unwrap();
    assert_eq!(restored.node("n0").unwrap().label, "Step 0");
}
