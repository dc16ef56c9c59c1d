//! The compiled, serializable promotion rule.

use crate::error::ValidationError;
use crate::graph::{Connection, LogicalOp, Operator};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

mod metadata;
mod value;

pub use metadata::*;
pub use value::*;

/// Field a compiled condition tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    ProductId,
    CategoryId,
    CustomerEmail,
    Quantity,
    CustomerTier,
}

impl ConditionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionType::ProductId => "product_id",
            ConditionType::CategoryId => "category_id",
            ConditionType::CustomerEmail => "customer_email",
            ConditionType::Quantity => "quantity",
            ConditionType::CustomerTier => "customer_tier",
        }
    }
}

/// Effect of a compiled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    PercentageDiscount,
    FreeUnits,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::PercentageDiscount => "percentage_discount",
            ActionType::FreeUnits => "free_units",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionEntry {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub operator: Operator,
    pub value: Value,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionEntry {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub value: Value,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalEntry {
    #[serde(rename = "type")]
    pub op: LogicalOp,
    pub id: String,
}

/// The document handed to the promotion rule API.
///
/// `salience`, `stackable` and the validity window are inputs for the
/// external evaluation engine; nothing here orders or combines rules.
/// A rule without logical nodes or connections means all of its conditions
/// must hold (implicit AND), see [`crate::logic::gates`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRule {
    pub name: String,
    pub salience: i32,
    pub stackable: bool,
    pub active: bool,
    #[serde(rename = "valid_from")]
    pub valid_from: Option<NaiveDate>,
    #[serde(rename = "valid_until")]
    pub valid_until: Option<NaiveDate>,
    pub conditions: Vec<ConditionEntry>,
    pub actions: Vec<ActionEntry>,
    pub logical_nodes: Vec<LogicalEntry>,
    pub connections: Vec<Connection>,
    pub created_at: DateTime<Utc>,
}

impl PromotionRule {
    /// Pre-submission check: at least one condition and one action.
    ///
    /// Kept out of compilation so partial graphs can still be compiled.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.conditions.is_empty() {
            return Err(ValidationError::EmptyConditions);
        }
        if self.actions.is_empty() {
            return Err(ValidationError::EmptyActions);
        }
        Ok(())
    }

    pub fn condition(&self, id: &str) -> Option<&ConditionEntry> {
        self.conditions.iter().find(|c| c.id == id)
    }

    pub fn action(&self, id: &str) -> Option<&ActionEntry> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn logical_node(&self, id: &str) -> Option<&LogicalEntry> {
        self.logical_nodes.iter().find(|l| l.id == id)
    }

    /// Whether the validity window covers `date`. Open ends are unbounded.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.valid_from.is_none_or(|from| from <= date)
            && self.valid_until.is_none_or(|until| date <= until)
    }
}
