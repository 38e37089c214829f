//! Raw query input accepted by the client.

use serde_json::Value;

use crate::PattonError;

/// A single check request as supplied by the caller.
///
/// Either one delimited string or an ordered list of items. The dynamic
/// "string or list" shape is validated once, at the boundary, by
/// `TryFrom<serde_json::Value>`; everything downstream works on this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    Text(String),
    Items(Vec<String>),
}

impl QueryInput {
    pub fn is_empty(&self) -> bool {
        match self {
            QueryInput::Text(text) => text.trim().is_empty(),
            QueryInput::Items(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}

impl From<&str> for QueryInput {
    fn from(text: &str) -> Self {
        QueryInput::Text(text.to_string())
    }
}

impl From<String> for QueryInput {
    fn from(text: String) -> Self {
        QueryInput::Text(text)
    }
}

impl From<Vec<String>> for QueryInput {
    fn from(items: Vec<String>) -> Self {
        QueryInput::Items(items)
    }
}

impl From<Vec<&str>> for QueryInput {
    fn from(items: Vec<&str>) -> Self {
        QueryInput::Items(items.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for QueryInput {
    fn from(items: &[&str]) -> Self {
        QueryInput::Items(items.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for QueryInput {
    fn from(items: [&str; N]) -> Self {
        QueryInput::Items(items.iter().map(|s| s.to_string()).collect())
    }
}

impl TryFrom<Value> for QueryInput {
    type Error = PattonError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(QueryInput::Text(text)),
            Value::Array(values) => values
                .into_iter()
                .enumerate()
                .map(|(index, value)| match value {
                    Value::String(item) => Ok(item),
                    other => Err(PattonError::invalid_format(format!(
                        "item {} should be a string, got {}",
                        index,
                        json_kind(&other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(QueryInput::Items),
            other => Err(PattonError::invalid_format(format!(
                "should be a list or a space separated string, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
