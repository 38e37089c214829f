//! Vulnerability data returned by the Patton server.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CPEs and CVEs matched for a single dependency.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyVulns {
    pub cpes: Vec<String>,
    pub cves: Vec<String>,
}

impl DependencyVulns {
    pub fn is_vulnerable(&self) -> bool {
        !self.cves.is_empty()
    }
}

/// Dependency identifier → matched vulnerability data.
pub type DependencyResult = BTreeMap<String, DependencyVulns>;

/// Banner string → vulnerability data as reported by the server.
pub type BannerResult = BTreeMap<String, serde_json::Value>;
