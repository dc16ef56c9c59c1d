//! The JSON shape a visual editor exports, and the conversion into a [`RuleGraph`].

use super::{
    ActionNode, ConditionNode, Connection, LogicalOp, Node, NodeKind, Operator, RuleGraph,
    Subtype,
};
use crate::compiler::SubtypeRegistry;
use crate::error::CompileError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A node as exported by the editor: subtype name plus free-form data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub id: String,
    /// Node family (`condition`, `action`, `logical`). Optional on input;
    /// when present it must agree with the subtype.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(alias = "type", alias = "nodeType")]
    pub subtype: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// A complete editor export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGraph {
    pub nodes: Vec<RawNode>,
    #[serde(default, alias = "edges")]
    pub connections: Vec<Connection>,
}

/// A trait for custom editor formats that can be turned into a [`RuleGraph`].
///
/// Implement it on your own export structs to plug them into the compiler.
pub trait IntoGraph {
    fn into_graph(self, registry: &SubtypeRegistry) -> Result<RuleGraph, CompileError>;
}

impl IntoGraph for RawGraph {
    fn into_graph(self, registry: &SubtypeRegistry) -> Result<RuleGraph, CompileError> {
        let mut graph = RuleGraph::new();
        for raw in &self.nodes {
            graph.add_node(registry.classify(raw)?)?;
        }
        for c in &self.connections {
            graph.add_connection(&c.from, &c.from_output, &c.to, &c.to_input)?;
        }
        Ok(graph)
    }
}

impl TryFrom<RawNode> for Node {
    type Error = CompileError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        SubtypeRegistry::default().classify(&raw)
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        RawNode {
            id: node.id().to_string(),
            kind: Some(node.kind().family().to_string()),
            subtype: node.kind().subtype().to_string(),
            data: encode_data(node.kind()),
        }
    }
}

impl From<&RuleGraph> for RawGraph {
    fn from(graph: &RuleGraph) -> Self {
        RawGraph {
            nodes: graph.nodes().iter().cloned().map(RawNode::from).collect(),
            connections: graph.connections().to_vec(),
        }
    }
}

/// Builds the typed node payload for an already resolved subtype.
pub(crate) fn decode_kind(
    subtype: Subtype,
    node_id: &str,
    data: &Map<String, Value>,
) -> Result<NodeKind, CompileError> {
    let fields = Fields {
        node_id,
        subtype,
        data,
    };
    let kind = match subtype {
        Subtype::ProductId => NodeKind::Condition(ConditionNode::ProductId {
            operator: fields.operator()?,
            product_id: fields.integer(&["productId", "product_id"])?,
        }),
        Subtype::Category => NodeKind::Condition(ConditionNode::Category {
            operator: fields.operator()?,
            category_id: fields.integer(&["categoryId", "category_id"])?,
        }),
        Subtype::Email => NodeKind::Condition(ConditionNode::Email {
            operator: fields.operator()?,
            email: fields.text(&["email"])?,
        }),
        Subtype::Quantity => NodeKind::Condition(ConditionNode::Quantity {
            operator: fields.operator()?,
            quantity: fields.integer(&["quantity"])?,
        }),
        Subtype::CustomerTier => NodeKind::Condition(ConditionNode::CustomerTier {
            operator: fields.operator()?,
            tier: fields.text(&["tier", "customerTier"])?,
        }),
        Subtype::PercentageDiscount => NodeKind::Action(ActionNode::PercentageDiscount {
            percentage: fields.number(&["percentage"])?,
        }),
        Subtype::FreeUnits => {
            let quantity = fields.integer(&["quantity"])?;
            let quantity = u32::try_from(quantity)
                .map_err(|_| fields.invalid(format!("quantity {} is out of range", quantity)))?;
            NodeKind::Action(ActionNode::FreeUnits { quantity })
        }
        Subtype::And => NodeKind::Logical(LogicalOp::And),
        Subtype::Or => NodeKind::Logical(LogicalOp::Or),
    };
    Ok(kind)
}

fn encode_data(kind: &NodeKind) -> Map<String, Value> {
    let value = match kind {
        NodeKind::Condition(ConditionNode::ProductId {
            operator,
            product_id,
        }) => json!({ "operator": operator, "productId": product_id }),
        NodeKind::Condition(ConditionNode::Category {
            operator,
            category_id,
        }) => json!({ "operator": operator, "categoryId": category_id }),
        NodeKind::Condition(ConditionNode::Email { operator, email }) => {
            json!({ "operator": operator, "email": email })
        }
        NodeKind::Condition(ConditionNode::Quantity { operator, quantity }) => {
            json!({ "operator": operator, "quantity": quantity })
        }
        NodeKind::Condition(ConditionNode::CustomerTier { operator, tier }) => {
            json!({ "operator": operator, "tier": tier })
        }
        NodeKind::Action(ActionNode::PercentageDiscount { percentage }) => {
            json!({ "percentage": percentage })
        }
        NodeKind::Action(ActionNode::FreeUnits { quantity }) => json!({ "quantity": quantity }),
        NodeKind::Logical(_) => json!({}),
    };
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Field access over a raw node's data map. Editors often hand numbers over
/// as strings straight from text inputs, so numeric fields accept both.
struct Fields<'a> {
    node_id: &'a str,
    subtype: Subtype,
    data: &'a Map<String, Value>,
}

impl Fields<'_> {
    fn invalid(&self, message: String) -> CompileError {
        CompileError::InvalidNodeData {
            node_id: self.node_id.to_string(),
            subtype: self.subtype.to_string(),
            message,
        }
    }

    fn raw(&self, keys: &[&str]) -> Result<&Value, CompileError> {
        keys.iter()
            .find_map(|key| self.data.get(*key).filter(|v| !v.is_null()))
            .ok_or_else(|| self.invalid(format!("missing field '{}'", keys[0])))
    }

    fn operator(&self) -> Result<Operator, CompileError> {
        let raw = self.raw(&["operator"])?;
        serde_json::from_value(raw.clone())
            .map_err(|_| self.invalid(format!("unknown operator {}", raw)))
    }

    fn integer(&self, keys: &[&str]) -> Result<i64, CompileError> {
        let raw = self.raw(keys)?;
        let parsed = match raw {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.invalid(format!("'{}' must be an integer, got {}", keys[0], raw)))
    }

    fn number(&self, keys: &[&str]) -> Result<f64, CompileError> {
        let raw = self.raw(keys)?;
        let parsed = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.invalid(format!("'{}' must be a number, got {}", keys[0], raw)))
    }

    fn text(&self, keys: &[&str]) -> Result<String, CompileError> {
        let raw = self.raw(keys)?;
        raw.as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(format!("'{}' must be a string, got {}", keys[0], raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let kind = decode_kind(
            Subtype::ProductId,
            "n1",
            &data(json!({ "operator": "equals", "productId": " 42 " })),
        )
        .unwrap();
        assert_eq!(
            kind,
            NodeKind::Condition(ConditionNode::ProductId {
                operator: Operator::Equals,
                product_id: 42,
            })
        );
    }

    #[test]
    fn missing_field_is_reported() {
        let err = decode_kind(Subtype::Email, "n7", &data(json!({ "operator": "equals" })))
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidNodeData {
                node_id: "n7".to_string(),
                subtype: "email".to_string(),
                message: "missing field 'email'".to_string(),
            }
        );
    }

    #[test]
    fn negative_free_units_are_rejected() {
        let err = decode_kind(Subtype::FreeUnits, "n2", &data(json!({ "quantity": -1 })));
        assert!(matches!(err, Err(CompileError::InvalidNodeData { .. })));
    }

    #[test]
    fn encoded_data_decodes_to_the_same_kind() {
        let kind = NodeKind::Condition(ConditionNode::CustomerTier {
            operator: Operator::NotEquals,
            tier: "gold".to_string(),
        });
        let decoded = decode_kind(Subtype::CustomerTier, "n1", &encode_data(&kind)).unwrap();
        assert_eq!(decoded, kind);
    }
}
