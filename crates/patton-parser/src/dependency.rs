//! Dependency token parsing.
//!
//! A token is split on the first `:` into name and version. Python sources
//! also accept requirements-style `name==version`. A token without any
//! delimiter is passed through as a name with an empty version; a token with
//! an empty name is skipped.

use patton_core::SourceType;
use serde::Serialize;
use std::fmt;

const DELIMITER: char = ':';
const PYTHON_DELIMITER: &str = "==";

/// A single library the server should look up.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Dependency {
    #[serde(rename = "library")]
    pub name: String,
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse one token. Returns `None` only when the name part is empty.
    pub fn parse(token: &str, source: SourceType) -> Option<Self> {
        let token = token.trim();

        let (name, version) = match token.split_once(DELIMITER) {
            Some(parts) => parts,
            None if source == SourceType::Python => {
                token.split_once(PYTHON_DELIMITER).unwrap_or((token, ""))
            }
            None => (token, ""),
        };

        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self::new(name, version.trim()))
    }

    pub fn has_version(&self) -> bool {
        !self.version.is_empty()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_version() {
            write!(f, "{}{}{}", self.name, DELIMITER, self.version)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Parse normalized tokens, preserving order.
pub fn parse_dependencies(tokens: &[String], source: SourceType) -> Vec<Dependency> {
    tokens
        .iter()
        .filter_map(|token| {
            let parsed = Dependency::parse(token, source);
            match &parsed {
                None => log::warn!("Skipping dependency '{}': missing library name", token),
                Some(dep) if !dep.has_version() => {
                    log::debug!("Dependency '{}' has no version, sending name only", dep.name)
                }
                Some(_) => {}
            }
            parsed
        })
        .collect()
}
