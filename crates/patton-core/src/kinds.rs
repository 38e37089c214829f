//! Source, banner and output kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PattonError;

/// How the Patton server should interpret a dependency list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Auto,
    Simple,
    Python,
    Nodejs,
    Java,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Auto => "auto",
            SourceType::Simple => "simple",
            SourceType::Python => "python",
            SourceType::Nodejs => "nodejs",
            SourceType::Java => "java",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = PattonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SourceType::Auto),
            "simple" => Ok(SourceType::Simple),
            "python" => Ok(SourceType::Python),
            "nodejs" => Ok(SourceType::Nodejs),
            "java" => Ok(SourceType::Java),
            other => Err(PattonError::invalid_format(format!(
                "unknown source type '{}' (valid: auto, simple, python, nodejs, java)",
                other
            ))),
        }
    }
}

/// Service banner family. `Auto` asks the classifier to detect it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BannerType {
    #[default]
    Auto,
    Ssh,
    Http,
    Ftp,
    Smtp,
    Generic,
}

impl BannerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BannerType::Auto => "auto",
            BannerType::Ssh => "ssh",
            BannerType::Http => "http",
            BannerType::Ftp => "ftp",
            BannerType::Smtp => "smtp",
            BannerType::Generic => "generic",
        }
    }
}

impl fmt::Display for BannerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BannerType {
    type Err = PattonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(BannerType::Auto),
            "ssh" => Ok(BannerType::Ssh),
            "http" => Ok(BannerType::Http),
            "ftp" => Ok(BannerType::Ftp),
            "smtp" => Ok(BannerType::Smtp),
            "generic" => Ok(BannerType::Generic),
            other => Err(PattonError::invalid_format(format!(
                "unknown banner type '{}' (valid: auto, ssh, http, ftp, smtp, generic)",
                other
            ))),
        }
    }
}

/// Rendering mode for results.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PattonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(PattonError::invalid_format(format!(
                "unknown display format '{}' (valid: table, json)",
                other
            ))),
        }
    }
}
