use serde::{Deserialize, Serialize};
use std::fmt;

/// Output socket of a condition node, and the single input socket of an action node.
pub const CONDITION_SOCKET: &str = "condition";
/// First input of a logical node.
pub const INPUT_A: &str = "a";
/// Second input of a logical node.
pub const INPUT_B: &str = "b";
/// Output socket of a logical node.
pub const RESULT_SOCKET: &str = "result";

const NO_SOCKETS: &[&str] = &[];
const CONDITION_SOCKETS: &[&str] = &[CONDITION_SOCKET];
const LOGICAL_INPUTS: &[&str] = &[INPUT_A, INPUT_B];
const LOGICAL_OUTPUTS: &[&str] = &[RESULT_SOCKET];

/// Comparison applied by a condition node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Contains,
    In,
    NotIn,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::GreaterThan => "greater_than",
            Operator::GreaterThanOrEqual => "greater_than_or_equal",
            Operator::LessThan => "less_than",
            Operator::LessThanOrEqual => "less_than_or_equal",
            Operator::Contains => "contains",
            Operator::In => "in",
            Operator::NotIn => "not_in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three node families. Each family has a fixed socket layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeFamily {
    Condition,
    Action,
    Logical,
}

impl NodeFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeFamily::Condition => "condition",
            NodeFamily::Action => "action",
            NodeFamily::Logical => "logical",
        }
    }

    pub fn inputs(self) -> &'static [&'static str] {
        match self {
            NodeFamily::Condition => NO_SOCKETS,
            NodeFamily::Action => CONDITION_SOCKETS,
            NodeFamily::Logical => LOGICAL_INPUTS,
        }
    }

    pub fn outputs(self) -> &'static [&'static str] {
        match self {
            NodeFamily::Condition => CONDITION_SOCKETS,
            NodeFamily::Action => NO_SOCKETS,
            NodeFamily::Logical => LOGICAL_OUTPUTS,
        }
    }
}

impl fmt::Display for NodeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines the closed set of node subtypes together with their wire names and families.
macro_rules! define_subtypes {
    ( $( ($variant:ident, $name:expr, $family:ident) ),* $(,)? ) => {
        /// Every node subtype the compiler knows how to map into a rule entry.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Subtype {
            $( $variant, )*
        }

        impl Subtype {
            pub const ALL: &'static [Subtype] = &[ $( Subtype::$variant, )* ];

            /// The name used for this subtype in editor exports.
            pub fn name(self) -> &'static str {
                match self {
                    $( Subtype::$variant => $name, )*
                }
            }

            pub fn family(self) -> NodeFamily {
                match self {
                    $( Subtype::$variant => NodeFamily::$family, )*
                }
            }

            pub fn from_name(name: &str) -> Option<Subtype> {
                match name {
                    $( $name => Some(Subtype::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

define_subtypes! {
    (ProductId, "product-id", Condition),
    (Category, "category", Condition),
    (Email, "email", Condition),
    (Quantity, "quantity", Condition),
    (CustomerTier, "customer-tier", Condition),
    (PercentageDiscount, "percentage-discount", Action),
    (FreeUnits, "free-units", Action),
    (And, "and", Logical),
    (Or, "or", Logical),
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A predicate over cart or customer data.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionNode {
    ProductId { operator: Operator, product_id: i64 },
    Category { operator: Operator, category_id: i64 },
    Email { operator: Operator, email: String },
    Quantity { operator: Operator, quantity: i64 },
    CustomerTier { operator: Operator, tier: String },
}

impl ConditionNode {
    pub fn operator(&self) -> Operator {
        match self {
            ConditionNode::ProductId { operator, .. }
            | ConditionNode::Category { operator, .. }
            | ConditionNode::Email { operator, .. }
            | ConditionNode::Quantity { operator, .. }
            | ConditionNode::CustomerTier { operator, .. } => *operator,
        }
    }

    pub fn set_operator(&mut self, new_operator: Operator) {
        match self {
            ConditionNode::ProductId { operator, .. }
            | ConditionNode::Category { operator, .. }
            | ConditionNode::Email { operator, .. }
            | ConditionNode::Quantity { operator, .. }
            | ConditionNode::CustomerTier { operator, .. } => *operator = new_operator,
        }
    }

    pub fn subtype(&self) -> Subtype {
        match self {
            ConditionNode::ProductId { .. } => Subtype::ProductId,
            ConditionNode::Category { .. } => Subtype::Category,
            ConditionNode::Email { .. } => Subtype::Email,
            ConditionNode::Quantity { .. } => Subtype::Quantity,
            ConditionNode::CustomerTier { .. } => Subtype::CustomerTier,
        }
    }

    fn check(&self) -> Result<(), String> {
        match self {
            ConditionNode::ProductId { product_id, .. } if *product_id <= 0 => {
                Err(format!("product id must be positive, got {}", product_id))
            }
            ConditionNode::Category { category_id, .. } if *category_id <= 0 => {
                Err(format!("category id must be positive, got {}", category_id))
            }
            ConditionNode::Quantity { quantity, .. } if *quantity < 0 => {
                Err(format!("quantity must not be negative, got {}", quantity))
            }
            ConditionNode::Email { email, .. } if email.trim().is_empty() => {
                Err("email must not be empty".to_string())
            }
            ConditionNode::CustomerTier { tier, .. } if tier.trim().is_empty() => {
                Err("customer tier must not be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// An effect applied to the cart when the action's gate holds.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionNode {
    PercentageDiscount { percentage: f64 },
    FreeUnits { quantity: u32 },
}

impl ActionNode {
    pub fn subtype(&self) -> Subtype {
        match self {
            ActionNode::PercentageDiscount { .. } => Subtype::PercentageDiscount,
            ActionNode::FreeUnits { .. } => Subtype::FreeUnits,
        }
    }

    fn check(&self) -> Result<(), String> {
        match self {
            ActionNode::PercentageDiscount { percentage }
                if !percentage.is_finite() || *percentage <= 0.0 || *percentage > 100.0 =>
            {
                Err(format!(
                    "percentage must be greater than 0 and at most 100, got {}",
                    percentage
                ))
            }
            ActionNode::FreeUnits { quantity: 0 } => {
                Err("free units must be at least 1".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// AND/OR combinator over two condition (or nested logical) results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn subtype(self) -> Subtype {
        match self {
            LogicalOp::And => Subtype::And,
            LogicalOp::Or => Subtype::Or,
        }
    }
}

/// Tagged node payload. The family decides the socket layout, the inner
/// variant decides the subtype.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Condition(ConditionNode),
    Action(ActionNode),
    Logical(LogicalOp),
}

impl NodeKind {
    pub fn family(&self) -> NodeFamily {
        match self {
            NodeKind::Condition(_) => NodeFamily::Condition,
            NodeKind::Action(_) => NodeFamily::Action,
            NodeKind::Logical(_) => NodeFamily::Logical,
        }
    }

    pub fn subtype(&self) -> Subtype {
        match self {
            NodeKind::Condition(condition) => condition.subtype(),
            NodeKind::Action(action) => action.subtype(),
            NodeKind::Logical(op) => op.subtype(),
        }
    }

    pub fn inputs(&self) -> &'static [&'static str] {
        self.family().inputs()
    }

    pub fn outputs(&self) -> &'static [&'static str] {
        self.family().outputs()
    }

    /// Range checks on the values a node carries.
    pub(crate) fn check(&self) -> Result<(), String> {
        match self {
            NodeKind::Condition(condition) => condition.check(),
            NodeKind::Action(action) => action.check(),
            NodeKind::Logical(_) => Ok(()),
        }
    }
}

/// A node of a rule graph. The id is caller-assigned and unique within its graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "super::wire::RawNode", into = "super::wire::RawNode")]
pub struct Node {
    id: String,
    kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn condition(id: impl Into<String>, condition: ConditionNode) -> Self {
        Self::new(id, NodeKind::Condition(condition))
    }

    pub fn action(id: impl Into<String>, action: ActionNode) -> Self {
        Self::new(id, NodeKind::Action(action))
    }

    pub fn logical(id: impl Into<String>, op: LogicalOp) -> Self {
        Self::new(id, NodeKind::Logical(op))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }
}
