//! Query filters for list operations
//!
//! A filter is the value of the `q` query parameter and has the form
//! `field:value`, for example `space_guid:7b2c...`. The value is everything
//! after the first colon, so values may themselves contain colons.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the query parameter carrying a filter
pub const QUERY_PARAM: &str = "q";

/// Errors produced while parsing a filter expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Filter expression is empty")]
    Empty,

    #[error("Filter '{0}' is missing the ':' separator")]
    MissingSeparator(String),

    #[error("Filter field '{0}' is invalid (expected lowercase letters, digits or '_')")]
    InvalidField(String),

    #[error("Filter '{0}' has no value")]
    EmptyValue(String),
}

/// Parsed `field:value` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryFilter {
    field: String,
    value: String,
}

impl QueryFilter {
    /// Build a filter from its parts without parsing
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Parse a `field:value` expression
    pub fn parse(expression: &str) -> Result<Self, FilterError> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(FilterError::Empty);
        }

        let (field, value) = expression
            .split_once(':')
            .ok_or_else(|| FilterError::MissingSeparator(expression.to_string()))?;

        if field.is_empty()
            || !field
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(FilterError::InvalidField(field.to_string()));
        }

        if value.is_empty() {
            return Err(FilterError::EmptyValue(expression.to_string()));
        }

        Ok(Self::new(field, value))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// `("q", "field:value")`, ready to append to a query string
    pub fn to_query_pair(&self) -> (String, String) {
        (QUERY_PARAM.to_string(), self.to_string())
    }
}

impl FromStr for QueryFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.value)
    }
}
