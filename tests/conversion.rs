//! Tests for the step-list/graph conversion and its round-trip property.
mod common;

use common::{chain_definition, positioned_step, step};
use flowcanvas::prelude::*;

/// Property 1: steps -> graph -> steps is set-equivalent for any
/// well-formed definition, including branches and configs.
#[test]
fn round_trip_preserves_steps() {
    let mut branch = positioned_step("n1", "web_scrape", "Scrape", 250.0, 50.0);
    branch.next = Some(vec!["n2".to_string(), "n3".to_string()]);
    branch
        .config
        .insert("url".to_string(), serde_json::json!("https://example.com"));

    let mut left = positioned_step("n2", "filter", "Filter", 100.0, 200.0);
    left.next = Some(vec!["n4".to_string()]);
    let mut right = positioned_step("n3", "enrich", "Enrich", 400.0, 200.0);
    right.next = Some(vec!["n4".to_string()]);
    let sink = positioned_step("n4", "send_email", "Notify", 250.0, 350.0);

    let original = vec![branch, left, right, sink];
    let graph = steps_to_graph(&original).unwrap();
    let mut restored = graph_to_steps(&graph);

    restored.sort_by(|a, b| a.id.cmp(&b.id));
    let mut expected = original.clone();
    expected.sort_by(|a, b| a.id.cmp(&b.id));

    assert_eq!(restored.len(), expected.len());
    for (got, want) in restored.iter().zip(&expected) {
        assert_eq!(got.id, want.id);
        assert_eq!(got.kind, want.kind);
        assert_eq!(got.name, want.name);
        assert_eq!(got.config, want.config);
        assert_eq!(got.position, want.position);

        // Successor sets are order-independent.
        let mut got_next = got.next.clone().unwrap_or_default();
        let mut want_next = want.next.clone().unwrap_or_default();
        got_next.sort();
        want_next.sort();
        assert_eq!(got_next, want_next, "successors of {}", got.id);
    }
}

#[test]
fn one_edge_per_successor_pair() {
    let definition = chain_definition(&["a", "b", "c"]);
    let graph = steps_to_graph(&definition.steps).unwrap();
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 2);
    assert!(graph.has_edge_between("a", "b"));
    assert!(graph.has_edge_between("b", "c"));
}

#[test]
fn loaded_edges_get_deterministic_ids() {
    let definition = chain_definition(&["a", "b"]);
    let graph = steps_to_graph(&definition.steps).unwrap();
    assert_eq!(graph.edges[0].id, "e1-a-b");
    assert_eq!(graph.edges[0].id, Edge::derived_id("a", "b"));
}

/// Step ids may contain `-`; the pairs ("a-b", "c") and ("a", "b-c")
/// must still derive distinct edge ids.
#[test]
fn derived_edge_ids_never_collide_for_hyphenated_step_ids() {
    assert_ne!(Edge::derived_id("a-b", "c"), Edge::derived_id("a", "b-c"));

    let mut first = positioned_step("a-b", "task", "First", 250.0, 50.0);
    first.next = Some(vec!["c".to_string()]);
    let mut second = positioned_step("a", "task", "Second", 250.0, 170.0);
    second.next = Some(vec!["b-c".to_string()]);
    let sinks = [
        positioned_step("c", "task", "C", 100.0, 290.0),
        positioned_step("b-c", "task", "BC", 400.0, 290.0),
    ];

    let steps = vec![first, second, sinks[0].clone(), sinks[1].clone()];
    let graph = steps_to_graph(&steps).unwrap();
    assert_eq!(graph.edges.len(), 2);
    assert_ne!(graph.edges[0].id, graph.edges[1].id);
}

#[test]
fn missing_positions_fall_into_cascade() {
    let steps = vec![step("a", "task", "A"), step("b", "task", "B")];
    let graph = steps_to_graph(&steps).unwrap();
    let a = graph.node("a").unwrap().position;
    let b = graph.node("b").unwrap().position;
    // Same column, distinct rows: stacked but never fully overlapping.
    assert_eq!(a.x, b.x);
    assert!(b.y > a.y);
}

#[test]
fn absent_next_is_treated_as_terminal() {
    let steps = vec![step("only", "task", "Only")];
    let graph = steps_to_graph(&steps).unwrap();
    assert!(graph.edges.is_empty());
}

#[test]
fn dangling_successor_is_a_data_integrity_error() {
    let mut bad = step("a", "task", "A");
    bad.next = Some(vec!["ghost".to_string()]);
    let result = steps_to_graph(&[bad]);
    assert_eq!(
        result,
        Err(GraphError::DanglingSuccessor {
            step_id: "a".to_string(),
            missing_id: "ghost".to_string(),
        })
    );
}

/// Terminal steps omit the `next` field entirely rather than emitting an
/// empty list, to avoid meaningless diffs in stored definitions.
#[test]
fn terminal_steps_omit_next_in_serialized_form() {
    let definition = chain_definition(&["a", "b"]);
    let graph = steps_to_graph(&definition.steps).unwrap();
    let steps = graph_to_steps(&graph);

    let terminal = steps.iter().find(|s| s.id == "b").unwrap();
    assert!(terminal.next.is_none());
    let json = serde_json::to_string(terminal).unwrap();
    assert!(!json.contains("\"next\""));
}

#[test]
fn removing_a_node_drops_its_edges_from_the_flattened_list() {
    let definition = chain_definition(&["a", "b", "c"]);
    let mut graph = steps_to_graph(&definition.steps).unwrap();

    graph.remove_node("b").unwrap();
    assert!(graph.edges.is_empty());

    let steps = graph_to_steps(&graph);
    assert_eq!(steps.len(), 2);
    assert!(steps.iter().all(|s| s.next.is_none()));

    assert_eq!(
        graph.remove_node("b"),
        Err(GraphError::NodeNotFound("b".to_string()))
    );
}

/// Repeated saves without edits must produce byte-identical output.
#[test]
fn repeated_flattening_is_stable() {
    let definition = chain_definition(&["a", "b", "c"]);
    let graph = steps_to_graph(&definition.steps).unwrap();

    let first = graph_to_steps(&graph);
    let second = graph_to_steps(&graph);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
