//! Types for the HTTP boundary to the promotion rule service.
//!
//! No client lives here. Callers send the body produced by
//! [`submission_body`] to [`PROMOTION_RULES_PATH`] with whatever HTTP stack
//! they use, then decode the reply with [`ApiResponse::from_json`].

use crate::error::{ApiError, SubmissionError};
use crate::rule::PromotionRule;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `POST` submits a rule, `GET` lists stored rules.
pub const PROMOTION_RULES_PATH: &str = "/admin/promotion-rules";
/// Rule evaluation against a cart. Served by the external engine.
pub const EVALUATE_PATH: &str = "/evaluate";

/// Path for `DELETE`-ing one stored rule.
pub fn promotion_rule_path(id: &RuleId) -> String {
    format!("{}/{}", PROMOTION_RULES_PATH, id)
}

/// Validates the rule and encodes it as the JSON body of a submission.
pub fn submission_body(rule: &PromotionRule) -> Result<String, SubmissionError> {
    rule.validate()?;
    Ok(serde_json::to_string(rule).map_err(ApiError::from)?)
}

/// The envelope every endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(body)?)
    }
}

impl<T> ApiResponse<T> {
    /// Turns a failure envelope into [`ApiError::Rejected`] carrying the
    /// server's message unchanged.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected(self.message.unwrap_or_else(|| {
                "The server rejected the request without a message".to_string()
            })))
        }
    }

    /// Like [`into_result`](Self::into_result), but a success without data is an error.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.into_result()?.ok_or(ApiError::MissingData)
    }
}

/// Server-assigned rule id. Some backends use numbers, some strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleId::Number(n) => write!(f, "{}", n),
            RuleId::Text(s) => f.write_str(s),
        }
    }
}

/// A rule as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPromotionRule {
    #[serde(alias = "_id")]
    pub id: RuleId,
    #[serde(flatten)]
    pub rule: PromotionRule,
}
