//! Common test utilities for building rule graphs and metadata.
use chrono::{DateTime, TimeZone, Utc};
use waribiki::prelude::*;

/// A fixed instant so compiled documents can be compared.
#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
}

#[allow(dead_code)]
pub fn product_condition(id: &str, product_id: i64) -> Node {
    Node::condition(
        id,
        ConditionNode::ProductId {
            operator: Operator::Equals,
            product_id,
        },
    )
}

#[allow(dead_code)]
pub fn tier_condition(id: &str, operator: Operator, tier: &str) -> Node {
    Node::condition(
        id,
        ConditionNode::CustomerTier {
            operator,
            tier: tier.to_string(),
        },
    )
}

#[allow(dead_code)]
pub fn percentage_action(id: &str, percentage: f64) -> Node {
    Node::action(id, ActionNode::PercentageDiscount { percentage })
}

#[allow(dead_code)]
pub fn free_units_action(id: &str, quantity: u32) -> Node {
    Node::action(id, ActionNode::FreeUnits { quantity })
}

/// Metadata used throughout: "Spring Sale", salience 10, stackable, active, unbounded.
#[allow(dead_code)]
pub fn spring_sale() -> RuleMetadata {
    RuleMetadata::builder("Spring Sale")
        .salience(10)
        .stackable(true)
        .active(true)
        .build()
        .unwrap()
}

/// One product-id condition (42, equals) and one 15% discount, unconnected.
#[allow(dead_code)]
pub fn create_simple_graph() -> RuleGraph {
    let mut graph = RuleGraph::new();
    graph.add_node(product_condition("n1", 42)).unwrap();
    graph.add_node(percentage_action("n2", 15.0)).unwrap();
    graph
}

/// Two conditions joined through an AND node feeding a free-units action.
///
/// Logic: `product_id == 7 AND quantity >= 3` -> 1 free unit
#[allow(dead_code)]
pub fn create_and_graph() -> RuleGraph {
    let mut graph = RuleGraph::new();
    graph.add_node(product_condition("n1", 7)).unwrap();
    graph
        .add_node(Node::condition(
            "n2",
            ConditionNode::Quantity {
                operator: Operator::GreaterThanOrEqual,
                quantity: 3,
            },
        ))
        .unwrap();
    graph.add_node(Node::logical("n3", LogicalOp::And)).unwrap();
    graph.add_node(free_units_action("n4", 1)).unwrap();

    graph.add_connection("n1", CONDITION_SOCKET, "n3", INPUT_A).unwrap();
    graph.add_connection("n2", CONDITION_SOCKET, "n3", INPUT_B).unwrap();
    graph
        .add_connection("n3", RESULT_SOCKET, "n4", CONDITION_SOCKET)
        .unwrap();
    graph
}

/// An editor export: `(tier != gold OR email == vip@shop.test) AND category == 5` -> 20%.
#[allow(dead_code)]
pub const NESTED_GRAPH_JSON: &str = r#"{
    "nodes": [
        { "id": "tier", "kind": "condition", "subtype": "customer-tier",
          "data": { "operator": "not_equals", "tier": "gold" } },
        { "id": "mail", "subtype": "email",
          "data": { "operator": "equals", "email": "vip@shop.test" } },
        { "id": "cat", "subtype": "category",
          "data": { "operator": "equals", "categoryId": "5" } },
        { "id": "either", "kind": "logical", "subtype": "or" },
        { "id": "both", "subtype": "and" },
        { "id": "discount", "kind": "action", "subtype": "percentage-discount",
          "data": { "percentage": 20 } }
    ],
    "connections": [
        { "from": "tier", "fromOutput": "condition", "to": "either", "toInput": "a" },
        { "from": "mail", "fromOutput": "condition", "to": "either", "toInput": "b" },
        { "from": "either", "fromOutput": "result", "to": "both", "toInput": "a" },
        { "source": "cat", "sourceHandle": "condition", "target": "both", "targetHandle": "b" },
        { "from": "both", "fromOutput": "result", "to": "discount", "toInput": "condition" }
    ]
}"#;
