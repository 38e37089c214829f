//! Core types for the Patton client.
//!
//! This crate provides the types shared by every Patton component:
//! - Query input (string or list of strings) and its boundary validation
//! - Source, banner and output kinds
//! - Vulnerability data returned by the Patton server
//! - The error taxonomy (`PattonError`)

mod error;
mod kinds;
mod query;
mod vuln;

pub use error::{PattonError, Result};
pub use kinds::{BannerType, OutputFormat, SourceType};
pub use query::QueryInput;
pub use vuln::{BannerResult, DependencyResult, DependencyVulns};
