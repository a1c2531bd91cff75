//! Change record types
//!
//! A change record is built from the raw field map of one block and
//! validated before it ever reaches the store.

use crate::types::{FieldMap, UpdateMethod};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One parsed block of the change log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeRecord {
    /// Zero-based position among non-empty blocks
    pub index: usize,
    /// Target product key
    pub name: Option<String>,
    /// Operator tag
    pub method: Option<UpdateMethod>,
    /// Operator argument, format depends on `method`
    pub param: Option<String>,
    /// Any other keys present in the block
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ChangeRecord {
    /// Build a record from a raw field map.
    ///
    /// Empty `name` and `method` values count as absent.
    pub fn from_fields(index: usize, mut fields: FieldMap) -> Self {
        let name = fields.remove("name").filter(|v| !v.is_empty());
        let method = fields
            .remove("method")
            .filter(|v| !v.is_empty())
            .map(|v| UpdateMethod::parse(&v));
        let param = fields.remove("param");

        Self {
            index,
            name,
            method,
            param,
            extra: fields.into_iter().collect(),
        }
    }

    /// Create a record directly (mostly for tests and programmatic callers)
    pub fn new(name: impl Into<String>, method: impl Into<UpdateMethod>) -> Self {
        Self {
            name: Some(name.into()),
            method: Some(method.into()),
            ..Self::default()
        }
    }

    /// Set the operator argument
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    /// Check that both `name` and `method` are present
    pub fn validate(&self) -> Result<ValidChange<'_>, InvalidReason> {
        match (self.name.as_deref(), self.method.as_ref()) {
            (Some(name), Some(method)) => Ok(ValidChange {
                name,
                method,
                param: self.param.as_deref(),
            }),
            (None, Some(_)) => Err(InvalidReason::MissingName),
            (Some(_), None) => Err(InvalidReason::MissingMethod),
            (None, None) => Err(InvalidReason::MissingNameAndMethod),
        }
    }
}

/// Borrowed view of a record that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidChange<'a> {
    pub name: &'a str,
    pub method: &'a UpdateMethod,
    pub param: Option<&'a str>,
}

/// Why a change record was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    MissingName,
    MissingMethod,
    MissingNameAndMethod,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingName => "missing 'name'",
            Self::MissingMethod => "missing 'method'",
            Self::MissingNameAndMethod => "missing 'name' and 'method'",
        };
        f.write_str(text)
    }
}
