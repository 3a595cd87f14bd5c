//! # Search Request
//!
//! Request body for the platform's `search` endpoints: a time filter, a
//! list of field filters, and an optional projection of returned fields.
use serde::{Deserialize, Serialize};

/// Search Request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Time window the search covers
    pub time_filter: TimeFilter,
    /// Field filters, combined with AND semantics
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub filters: Vec<Filter>,
    /// Fields to return, all fields when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<Vec<String>>,
}

impl SearchRequest {
    /// Create a new Search Request over a time window
    pub fn new(time_filter: TimeFilter) -> Self {
        Self {
            time_filter,
            filters: Vec::new(),
            returns: None,
        }
    }

    /// Add a filter to the request
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the fields the search should return
    pub fn returns(mut self, fields: &[&str]) -> Self {
        self.returns = Some(fields.iter().map(|field| field.to_string()).collect());
        self
    }
}

/// Search Time Filter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeFilter {
    /// Window start, `YYYY-MM-DDTHH:MM:SSZ`
    pub start_time: String,
    /// Window end, `YYYY-MM-DDTHH:MM:SSZ`
    pub end_time: String,
}

/// Search Field Filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    /// Field name
    pub field: String,
    /// Filter expression
    pub expression: FilterExpression,
    /// Single value, for `eq` / `ne`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Value list, for `in` / `not_in`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<serde_json::Value>>,
}

impl Filter {
    /// Field equals value
    pub fn eq(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field: field.into(),
            expression: FilterExpression::Eq,
            value: Some(value.into()),
            values: None,
        }
    }

    /// Field does not equal value
    pub fn ne(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field: field.into(),
            expression: FilterExpression::Ne,
            value: Some(value.into()),
            values: None,
        }
    }

    /// Field is one of the values
    pub fn is_in(field: impl Into<String>, values: Vec<serde_json::Value>) -> Self {
        Self {
            field: field.into(),
            expression: FilterExpression::In,
            value: None,
            values: Some(values),
        }
    }

    /// Field is none of the values
    pub fn not_in(field: impl Into<String>, values: Vec<serde_json::Value>) -> Self {
        Self {
            field: field.into(),
            expression: FilterExpression::NotIn,
            value: None,
            values: Some(values),
        }
    }
}

/// Filter Expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterExpression {
    /// Equals
    Eq,
    /// Not Equals
    Ne,
    /// In list
    In,
    /// Not in list
    NotIn,
}
