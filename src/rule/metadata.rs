use crate::error::MetadataError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SALIENCE: i32 = 1;

/// Rule-level settings merged into the compiled document.
///
/// Construct it through [`RuleMetadata::builder`]; `build()` enforces a
/// positive salience and an ordered validity window. The editor's usual
/// salience range is 1-100, but only positivity is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MetadataDraft")]
pub struct RuleMetadata {
    name: String,
    salience: i32,
    stackable: bool,
    active: bool,
    valid_from: Option<NaiveDate>,
    valid_until: Option<NaiveDate>,
}

impl RuleMetadata {
    pub fn builder(name: impl Into<String>) -> RuleMetadataBuilder {
        RuleMetadataBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn salience(&self) -> i32 {
        self.salience
    }

    pub fn stackable(&self) -> bool {
        self.stackable
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn valid_from(&self) -> Option<NaiveDate> {
        self.valid_from
    }

    pub fn valid_until(&self) -> Option<NaiveDate> {
        self.valid_until
    }
}

impl Default for RuleMetadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            salience: DEFAULT_SALIENCE,
            stackable: false,
            active: true,
            valid_from: None,
            valid_until: None,
        }
    }
}

pub struct RuleMetadataBuilder {
    inner: RuleMetadata,
}

impl RuleMetadataBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: RuleMetadata {
                name: name.into(),
                ..RuleMetadata::default()
            },
        }
    }

    pub fn salience(mut self, salience: i32) -> Self {
        self.inner.salience = salience;
        self
    }

    pub fn stackable(mut self, stackable: bool) -> Self {
        self.inner.stackable = stackable;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.inner.active = active;
        self
    }

    pub fn valid_from(mut self, date: Option<NaiveDate>) -> Self {
        self.inner.valid_from = date;
        self
    }

    pub fn valid_until(mut self, date: Option<NaiveDate>) -> Self {
        self.inner.valid_until = date;
        self
    }

    pub fn build(self) -> Result<RuleMetadata, MetadataError> {
        let meta = self.inner;
        if meta.salience <= 0 {
            return Err(MetadataError::NonPositiveSalience(meta.salience));
        }
        if let (Some(valid_from), Some(valid_until)) = (meta.valid_from, meta.valid_until) {
            if valid_from > valid_until {
                return Err(MetadataError::InvertedValidityWindow {
                    valid_from,
                    valid_until,
                });
            }
        }
        Ok(meta)
    }
}

/// Unchecked metadata as read from JSON; goes through the builder.
#[derive(Deserialize)]
struct MetadataDraft {
    #[serde(default)]
    name: String,
    #[serde(default = "default_salience")]
    salience: i32,
    #[serde(default)]
    stackable: bool,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default, alias = "validFrom")]
    valid_from: Option<NaiveDate>,
    #[serde(default, alias = "validUntil")]
    valid_until: Option<NaiveDate>,
}

fn default_salience() -> i32 {
    DEFAULT_SALIENCE
}

fn default_active() -> bool {
    true
}

impl TryFrom<MetadataDraft> for RuleMetadata {
    type Error = MetadataError;

    fn try_from(draft: MetadataDraft) -> Result<Self, Self::Error> {
        RuleMetadata::builder(draft.name)
            .salience(draft.salience)
            .stackable(draft.stackable)
            .active(draft.active)
            .valid_from(draft.valid_from)
            .valid_until(draft.valid_until)
            .build()
    }
}
