//! Prelude module for convenient imports
//!
//! Re-exports the types needed to build, compile, validate and submit a rule.
//!
//! ```rust
//! use waribiki::prelude::*;
//!
//! let mut graph = RuleGraph::new();
//! graph
//!     .add_node(Node::condition(
//!         "tier",
//!         ConditionNode::CustomerTier { operator: Operator::NotEquals, tier: "gold".into() },
//!     ))
//!     .unwrap();
//! let rule = compile(&graph, &RuleMetadata::default());
//! assert_eq!(rule.validate(), Err(ValidationError::EmptyActions));
//! ```

// Graph model
pub use crate::graph::{
    ActionNode, CONDITION_SOCKET, ConditionNode, Connection, INPUT_A, INPUT_B, IntoGraph,
    LogicalOp, Node, NodeFamily, NodeKind, Operator, RESULT_SOCKET, RawGraph, RawNode, RuleGraph,
    Subtype,
};

// Compilation
pub use crate::compiler::{Compiler, SubtypeRegistry, compile, compile_at};

// Compiled document
pub use crate::rule::{
    ActionEntry, ActionType, ConditionEntry, ConditionType, LogicalEntry, PromotionRule,
    RuleMetadata, Value,
};

// Gate reconstruction
pub use crate::logic::{ActionGate, Gate, GateDisplay, gates};

// API boundary
pub use crate::api;

// Error types
pub use crate::error::{
    ApiError, CompileError, GraphError, LogicError, MetadataError, SubmissionError,
    ValidationError,
};
