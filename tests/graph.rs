//! Tests for graph construction, connection checks and editing.
mod common;
use common::*;
use waribiki::error::SocketDirection;
use waribiki::prelude::*;

#[test]
fn test_duplicate_id_is_rejected_without_partial_insert() {
    let mut graph = RuleGraph::new();
    graph.add_node(product_condition("n1", 42)).unwrap();

    let err = graph.add_node(percentage_action("n1", 10.0)).unwrap_err();
    assert_eq!(err, GraphError::DuplicateId("n1".to_string()));

    assert_eq!(graph.len(), 1);
    assert_eq!(graph.get_node("n1"), Some(&product_condition("n1", 42)));
}

#[test]
fn test_listing_keeps_insertion_order() {
    let graph = create_and_graph();
    let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id()).collect();
    assert_eq!(ids, vec!["n1", "n2", "n3", "n4"]);
    assert_eq!(graph.connections().len(), 3);
    assert_eq!(graph.connections()[2], Connection::new("n3", "result", "n4", "condition"));
}

#[test]
fn test_connection_to_unknown_node() {
    let mut graph = create_simple_graph();

    let err = graph
        .add_connection("n1", CONDITION_SOCKET, "ghost", CONDITION_SOCKET)
        .unwrap_err();
    assert_eq!(
        err,
        GraphError::UnknownNode {
            missing_node_id: "ghost".to_string()
        }
    );

    let err = graph
        .add_connection("ghost", CONDITION_SOCKET, "n2", CONDITION_SOCKET)
        .unwrap_err();
    assert!(matches!(err, GraphError::UnknownNode { missing_node_id } if missing_node_id == "ghost"));
    assert!(graph.connections().is_empty());
}

#[test]
fn test_socket_mismatch_on_action_second_input() {
    let mut graph = create_simple_graph();

    let err = graph
        .add_connection("n1", CONDITION_SOCKET, "n2", INPUT_B)
        .unwrap_err();
    match err {
        GraphError::SocketMismatch {
            node_id,
            direction,
            socket,
            expected,
            ..
        } => {
            assert_eq!(node_id, "n2");
            assert_eq!(direction, SocketDirection::Input);
            assert_eq!(socket, "b");
            assert_eq!(expected, "condition");
        }
        other => panic!("Expected SocketMismatch, got {:?}", other),
    }
}

#[test]
fn test_socket_mismatch_on_wrong_direction() {
    let mut graph = create_and_graph();
    graph.add_node(percentage_action("n5", 5.0)).unwrap();

    // Actions have no outputs.
    let err = graph
        .add_connection("n4", CONDITION_SOCKET, "n3", INPUT_A)
        .unwrap_err();
    assert!(matches!(
        err,
        GraphError::SocketMismatch { ref expected, direction: SocketDirection::Output, .. } if expected == "none"
    ));

    // A logical node's output is `result`, not `condition`.
    let err = graph
        .add_connection("n3", CONDITION_SOCKET, "n5", CONDITION_SOCKET)
        .unwrap_err();
    assert!(err.to_string().contains("result"));
}

#[test]
fn test_repeated_connection_is_a_no_op() {
    let mut graph = create_and_graph();
    graph.add_connection("n1", CONDITION_SOCKET, "n3", INPUT_A).unwrap();
    assert_eq!(graph.connections().len(), 3);
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let mut graph = RuleGraph::new();
    let err = graph.add_node(percentage_action("n1", 0.0)).unwrap_err();
    assert!(matches!(err, GraphError::InvalidNodeValue { .. }));
    let err = graph.add_node(free_units_action("n2", 0)).unwrap_err();
    assert!(matches!(err, GraphError::InvalidNodeValue { .. }));
    assert!(graph.is_empty());
}

#[test]
fn test_remove_node_cascades_to_connections() {
    let mut graph = create_and_graph();

    let removed = graph.remove_node("n3").unwrap();
    assert_eq!(removed.id(), "n3");
    assert!(!graph.contains("n3"));
    assert!(graph.connections().is_empty());

    // Index positions after the removed node stay valid.
    assert_eq!(graph.get_node("n4"), Some(&free_units_action("n4", 1)));
    assert_eq!(
        graph.remove_node("n3").unwrap_err(),
        GraphError::NodeNotFound("n3".to_string())
    );
}

#[test]
fn test_remove_connection() {
    let mut graph = create_and_graph();
    let link = Connection::new("n2", "condition", "n3", "b");
    assert!(graph.remove_connection(&link));
    assert!(!graph.remove_connection(&link));
    assert_eq!(graph.connections().len(), 2);
}

#[test]
fn test_update_node_changes_operator() {
    let mut graph = RuleGraph::new();
    graph
        .add_node(tier_condition("n1", Operator::Equals, "gold"))
        .unwrap();

    let node = graph
        .update_node("n1", |kind| {
            if let NodeKind::Condition(condition) = kind {
                condition.set_operator(Operator::NotEquals);
            }
        })
        .unwrap();
    assert_eq!(node, &tier_condition("n1", Operator::NotEquals, "gold"));
}

#[test]
fn test_update_node_rejects_family_change_and_bad_values() {
    let mut graph = create_and_graph();

    let err = graph
        .update_node("n3", |kind| *kind = NodeKind::Action(ActionNode::FreeUnits { quantity: 2 }))
        .unwrap_err();
    assert_eq!(
        err,
        GraphError::FamilyChange {
            node_id: "n3".to_string(),
            from: NodeFamily::Logical,
            to: NodeFamily::Action,
        }
    );
    assert_eq!(
        err.to_string(),
        "Node 'n3' cannot change from the logical family to the action family"
    );

    let err = graph
        .update_node("n4", |kind| *kind = NodeKind::Action(ActionNode::FreeUnits { quantity: 0 }))
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidNodeValue { .. }));

    // Neither failed edit left a trace.
    assert_eq!(graph.get_node("n3"), Some(&Node::logical("n3", LogicalOp::And)));
    assert_eq!(graph.get_node("n4"), Some(&free_units_action("n4", 1)));

    // Switching AND to OR keeps the socket layout.
    graph
        .update_node("n3", |kind| *kind = NodeKind::Logical(LogicalOp::Or))
        .unwrap();
    assert_eq!(graph.connections().len(), 3);
}

#[test]
fn test_update_unknown_node() {
    let mut graph = RuleGraph::new();
    let err = graph.update_node("nope", |_| {}).unwrap_err();
    assert_eq!(err, GraphError::NodeNotFound("nope".to_string()));
}
