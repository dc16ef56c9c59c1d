use crate::error::CompileError;
use crate::graph::{ActionNode, ConditionNode, IntoGraph, NodeKind, RuleGraph};
use crate::rule::{
    ActionEntry, ActionType, ConditionEntry, ConditionType, LogicalEntry, PromotionRule,
    RuleMetadata, Value,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

mod registry;

pub use registry::SubtypeRegistry;

/// Compiles a graph into a [`PromotionRule`], stamped with the current time.
///
/// Pure apart from the timestamp: the graph is not touched, and compiling
/// the same graph at the same instant yields the same document.
pub fn compile(graph: &RuleGraph, metadata: &RuleMetadata) -> PromotionRule {
    compile_at(graph, metadata, Utc::now())
}

/// Like [`compile`], with an explicit `createdAt`.
pub fn compile_at(
    graph: &RuleGraph,
    metadata: &RuleMetadata,
    created_at: DateTime<Utc>,
) -> PromotionRule {
    let mut conditions = Vec::new();
    let mut actions = Vec::new();
    let mut logical_nodes = Vec::new();

    for node in graph.nodes() {
        let id = node.id().to_string();
        debug!("Compiling node '{}' ({})", id, node.kind().subtype());
        match node.kind() {
            NodeKind::Condition(condition) => conditions.push(condition_entry(id, condition)),
            NodeKind::Action(action) => actions.push(action_entry(id, action)),
            NodeKind::Logical(op) => logical_nodes.push(LogicalEntry { op: *op, id }),
        }
    }

    let name = if metadata.name().trim().is_empty() {
        default_name(created_at)
    } else {
        metadata.name().to_string()
    };

    let rule = PromotionRule {
        name,
        salience: metadata.salience(),
        stackable: metadata.stackable(),
        active: metadata.active(),
        valid_from: metadata.valid_from(),
        valid_until: metadata.valid_until(),
        conditions,
        actions,
        logical_nodes,
        connections: graph.connections().to_vec(),
        created_at,
    };

    info!(
        "Compiled rule '{}': {} condition(s), {} action(s), {} logical node(s), {} connection(s)",
        rule.name,
        rule.conditions.len(),
        rule.actions.len(),
        rule.logical_nodes.len(),
        rule.connections.len()
    );
    rule
}

/// Name given to rules submitted without one.
pub fn default_name(created_at: DateTime<Utc>) -> String {
    format!("promotion-{}", created_at.timestamp_millis())
}

fn condition_entry(id: String, condition: &ConditionNode) -> ConditionEntry {
    let (condition_type, value) = match condition {
        ConditionNode::ProductId { product_id, .. } => {
            (ConditionType::ProductId, Value::from(*product_id))
        }
        ConditionNode::Category { category_id, .. } => {
            (ConditionType::CategoryId, Value::from(*category_id))
        }
        ConditionNode::Email { email, .. } => {
            (ConditionType::CustomerEmail, Value::from(email.as_str()))
        }
        ConditionNode::Quantity { quantity, .. } => {
            (ConditionType::Quantity, Value::from(*quantity))
        }
        ConditionNode::CustomerTier { tier, .. } => {
            (ConditionType::CustomerTier, Value::from(tier.as_str()))
        }
    };
    ConditionEntry {
        condition_type,
        operator: condition.operator(),
        value,
        id,
    }
}

fn action_entry(id: String, action: &ActionNode) -> ActionEntry {
    let (action_type, value) = match action {
        ActionNode::PercentageDiscount { percentage } => {
            (ActionType::PercentageDiscount, Value::from_number(*percentage))
        }
        ActionNode::FreeUnits { quantity } => (ActionType::FreeUnits, Value::from(*quantity)),
    };
    ActionEntry {
        action_type,
        value,
        id,
    }
}

/// Compiles editor exports. Holds the subtype registry used to classify raw nodes.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    registry: SubtypeRegistry,
}

pub struct CompilerBuilder {
    registry: SubtypeRegistry,
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self {
            registry: SubtypeRegistry::new(),
        }
    }

    /// Lets `user_subtype` stand for the built-in subtype `builtin_subtype`.
    /// Unknown built-in names are ignored.
    pub fn with_subtype_alias(mut self, user_subtype: &str, builtin_subtype: &str) -> Self {
        self.registry.alias(user_subtype, builtin_subtype);
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            registry: self.registry,
        }
    }
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn registry(&self) -> &SubtypeRegistry {
        &self.registry
    }

    /// Builds a graph from an editor export, enforcing every graph invariant.
    pub fn import(&self, source: impl IntoGraph) -> Result<RuleGraph, CompileError> {
        source.into_graph(&self.registry)
    }

    pub fn compile(&self, graph: &RuleGraph, metadata: &RuleMetadata) -> PromotionRule {
        compile(graph, metadata)
    }

    /// Imports an editor export and compiles it in one step.
    pub fn compile_raw(
        &self,
        source: impl IntoGraph,
        metadata: &RuleMetadata,
    ) -> Result<PromotionRule, CompileError> {
        let graph = self.import(source)?;
        Ok(compile(&graph, metadata))
    }
}
