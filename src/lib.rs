//! # Waribiki - Promotion Rule Graph Compiler
//!
//! **Waribiki** turns promotion rules assembled in a visual node editor into a
//! flat, serializable [`PromotionRule`](rule::PromotionRule) document for a
//! promotion rule service.
//!
//! ## Core Workflow
//!
//! 1.  **Build a graph**: Insert condition, action and logical (AND/OR) nodes into a
//!     [`RuleGraph`](graph::RuleGraph) and connect their sockets. Every insertion is
//!     checked, so a graph is always well-formed. Editor exports can be imported
//!     with [`Compiler::import`](compiler::Compiler::import).
//! 2.  **Compile**: [`compile`](compiler::compile) classifies every node, maps it into the
//!     `conditions`, `actions` or `logicalNodes` bucket, copies the connections and merges
//!     the [`RuleMetadata`](rule::RuleMetadata).
//! 3.  **Validate**: [`PromotionRule::validate`](rule::PromotionRule::validate) rejects rules
//!     without conditions or actions before they are submitted.
//! 4.  **Submit**: [`api::submission_body`] produces the JSON body for the rule service.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use waribiki::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut graph = RuleGraph::new();
//!     graph.add_node(Node::condition(
//!         "n1",
//!         ConditionNode::ProductId { operator: Operator::Equals, product_id: 42 },
//!     ))?;
//!     graph.add_node(Node::action(
//!         "n2",
//!         ActionNode::PercentageDiscount { percentage: 15.0 },
//!     ))?;
//!     graph.add_connection("n1", "condition", "n2", "condition")?;
//!
//!     let metadata = RuleMetadata::builder("Spring Sale")
//!         .salience(10)
//!         .stackable(true)
//!         .build()?;
//!
//!     let rule = compile(&graph, &metadata);
//!     rule.validate()?;
//!
//!     for action in gates(&rule)? {
//!         println!("{}:\n{}", action.action_id, GateDisplay { gate: &action.gate, rule: &rule });
//!     }
//!
//!     println!("{}", api::submission_body(&rule)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod compiler;
pub mod error;
pub mod graph;
pub mod logic;
pub mod prelude;
pub mod rule;
