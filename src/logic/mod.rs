//! Rebuilds, for every action of a compiled rule, the boolean expression
//! that gates it.
//!
//! The compiled document is flat. Walking its connections backwards from
//! each action's `condition` input gives the gate:
//!
//! - an action with nothing connected is gated by all conditions (implicit AND),
//! - several connections into the same input are ORed,
//! - a logical node needs both `a` and `b` connected.

use crate::error::LogicError;
use crate::graph::{CONDITION_SOCKET, INPUT_A, INPUT_B, LogicalOp, NodeFamily};
use crate::rule::PromotionRule;
use ahash::{AHashMap, AHashSet};
use std::collections::{HashMap, HashSet};
use tracing::warn;

mod display;

pub use display::GateDisplay;

/// Boolean expression over condition ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gate {
    Condition(String),
    And(Box<Gate>, Box<Gate>),
    Or(Box<Gate>, Box<Gate>),
    /// Every listed gate must hold. Used for the implicit AND fallback.
    All(Vec<Gate>),
}

impl Gate {
    /// Collects the ids of all conditions referenced by this gate.
    pub fn referenced_conditions(&self, ids: &mut HashSet<String>) {
        match self {
            Gate::Condition(id) => {
                ids.insert(id.clone());
            }
            Gate::And(l, r) | Gate::Or(l, r) => {
                l.referenced_conditions(ids);
                r.referenced_conditions(ids);
            }
            Gate::All(gates) => {
                for gate in gates {
                    gate.referenced_conditions(ids);
                }
            }
        }
    }

    /// Evaluates the gate given the outcome of each condition. Conditions
    /// missing from `outcomes` count as false.
    pub fn holds(&self, outcomes: &HashMap<String, bool>) -> bool {
        match self {
            Gate::Condition(id) => outcomes.get(id).copied().unwrap_or(false),
            Gate::And(l, r) => l.holds(outcomes) && r.holds(outcomes),
            Gate::Or(l, r) => l.holds(outcomes) || r.holds(outcomes),
            Gate::All(gates) => gates.iter().all(|g| g.holds(outcomes)),
        }
    }
}

/// The gate of one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionGate {
    pub action_id: String,
    pub gate: Gate,
}

/// Builds the gate of every action, in the rule's action order.
pub fn gates(rule: &PromotionRule) -> Result<Vec<ActionGate>, LogicError> {
    GateBuilder::new(rule)?.build_all()
}

struct GateBuilder<'a> {
    rule: &'a PromotionRule,
    logical: AHashMap<&'a str, LogicalOp>,
    conditions: AHashSet<&'a str>,
    /// target id -> input socket -> source ids
    incoming: AHashMap<&'a str, AHashMap<&'a str, Vec<&'a str>>>,
}

impl<'a> GateBuilder<'a> {
    fn new(rule: &'a PromotionRule) -> Result<Self, LogicError> {
        let conditions: AHashSet<&str> = rule.conditions.iter().map(|c| c.id.as_str()).collect();
        let logical: AHashMap<&str, LogicalOp> = rule
            .logical_nodes
            .iter()
            .map(|l| (l.id.as_str(), l.op))
            .collect();
        let actions: AHashSet<&str> = rule.actions.iter().map(|a| a.id.as_str()).collect();
        let family = |id: &str| {
            if conditions.contains(id) {
                Some(NodeFamily::Condition)
            } else if logical.contains_key(id) {
                Some(NodeFamily::Logical)
            } else if actions.contains(id) {
                Some(NodeFamily::Action)
            } else {
                None
            }
        };

        let mut incoming: AHashMap<&str, AHashMap<&str, Vec<&str>>> = AHashMap::new();
        for c in &rule.connections {
            let (Some(source), Some(target)) = (family(c.from.as_str()), family(c.to.as_str()))
            else {
                return Err(LogicError::DanglingReference {
                    from: c.from.clone(),
                    to: c.to.clone(),
                });
            };
            if !source.outputs().contains(&c.from_output.as_str()) {
                return Err(LogicError::UnknownSocket {
                    node_id: c.from.clone(),
                    socket: c.from_output.clone(),
                });
            }
            if !target.inputs().contains(&c.to_input.as_str()) {
                return Err(LogicError::UnknownSocket {
                    node_id: c.to.clone(),
                    socket: c.to_input.clone(),
                });
            }
            incoming
                .entry(c.to.as_str())
                .or_default()
                .entry(c.to_input.as_str())
                .or_default()
                .push(c.from.as_str());
        }

        Ok(Self {
            rule,
            logical,
            conditions,
            incoming,
        })
    }

    fn build_all(&self) -> Result<Vec<ActionGate>, LogicError> {
        self.rule
            .actions
            .iter()
            .map(|action| {
                let gate = match self.sources(&action.id, CONDITION_SOCKET) {
                    Some(_) => self.combine(&action.id, CONDITION_SOCKET, &mut AHashSet::new())?,
                    None => self.implicit_and(&action.id),
                };
                Ok(ActionGate {
                    action_id: action.id.clone(),
                    gate,
                })
            })
            .collect()
    }

    fn implicit_and(&self, action_id: &str) -> Gate {
        if !self.rule.logical_nodes.is_empty() {
            warn!(
                "Action '{}' is not connected; falling back to all conditions",
                action_id
            );
        }
        Gate::All(
            self.rule
                .conditions
                .iter()
                .map(|c| Gate::Condition(c.id.clone()))
                .collect(),
        )
    }

    fn sources(&self, target: &str, socket: &str) -> Option<&[&'a str]> {
        self.incoming
            .get(target)
            .and_then(|sockets| sockets.get(socket))
            .map(Vec::as_slice)
    }

    /// ORs together the gates of all sources feeding `target.socket`.
    fn combine(
        &self,
        target: &str,
        socket: &str,
        visiting: &mut AHashSet<&'a str>,
    ) -> Result<Gate, LogicError> {
        let Some((&first, rest)) = self.sources(target, socket).and_then(<[_]>::split_first)
        else {
            return Err(LogicError::MissingInput {
                node_id: target.to_string(),
                socket: socket.to_string(),
            });
        };
        let mut combined = self.build(first, visiting)?;
        for &source in rest {
            combined = Gate::Or(Box::new(combined), Box::new(self.build(source, visiting)?));
        }
        Ok(combined)
    }

    /// Builds the gate produced by a condition or logical node. Sockets were
    /// checked up front, so `id` is never an action here.
    fn build(&self, id: &'a str, visiting: &mut AHashSet<&'a str>) -> Result<Gate, LogicError> {
        let Some(op) = self.logical.get(id).copied() else {
            return Ok(Gate::Condition(id.to_string()));
        };
        if !visiting.insert(id) {
            return Err(LogicError::Cycle {
                node_id: id.to_string(),
            });
        }

        let a = self.combine(id, INPUT_A, visiting)?;
        let b = self.combine(id, INPUT_B, visiting)?;
        visiting.remove(id);

        Ok(match op {
            LogicalOp::And => Gate::And(Box::new(a), Box::new(b)),
            LogicalOp::Or => Gate::Or(Box::new(a), Box::new(b)),
        })
    }
}
