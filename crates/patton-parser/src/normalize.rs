//! Turns a raw `QueryInput` into an ordered list of atomic tokens.

use patton_core::{PattonError, QueryInput, Result};

/// Dependency queries: a string is split on whitespace, a list is taken as-is.
pub fn normalize_dependencies(input: &QueryInput) -> Result<Vec<String>> {
    let tokens: Vec<String> = match input {
        QueryInput::Text(text) => text.split_whitespace().map(str::to_string).collect(),
        QueryInput::Items(items) => collect_items(items),
    };
    non_empty(tokens)
}

/// Banner queries: banners contain spaces, so a string holds one banner per line.
pub fn normalize_banners(input: &QueryInput) -> Result<Vec<String>> {
    let tokens: Vec<String> = match input {
        QueryInput::Text(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        QueryInput::Items(items) => collect_items(items),
    };
    non_empty(tokens)
}

fn collect_items(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(tokens: Vec<String>) -> Result<Vec<String>> {
    if tokens.is_empty() {
        return Err(PattonError::invalid_format("query contains no items"));
    }
    Ok(tokens)
}
