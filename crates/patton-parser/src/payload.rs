//! Request payloads for the Patton API.

use patton_core::{BannerType, QueryInput, Result, SourceType};
use serde::Serialize;
use std::fmt;

use crate::banner::BannerClassifier;
use crate::dependency::{parse_dependencies, Dependency};
use crate::normalize::{normalize_banners, normalize_dependencies};

/// The server only tests this many libraries per request.
pub const MAX_DEPENDENCIES: usize = 300;

/// Above this many libraries the server's matching gets less accurate.
pub const ACCURACY_THRESHOLD: usize = 100;

/// Soft-limit notices raised while building a dependency payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitWarning {
    Truncated { submitted: usize, kept: usize },
    ReducedAccuracy { count: usize },
}

impl fmt::Display for LimitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitWarning::Truncated { submitted, kept } => write!(
                f,
                "You're trying to test '{}' dependencies. Patton server is limited to the \
                 first {} libraries. Only first {} will be tested.",
                submitted, kept, kept
            ),
            LimitWarning::ReducedAccuracy { count } => write!(
                f,
                "Patton server has less accuracy when you try more than {} libraries per \
                 request ({} given). It's advisable to not exceed this limit if you want \
                 more accurate results.",
                ACCURACY_THRESHOLD, count
            ),
        }
    }
}

/// Body of `POST /api/v1/check-dependencies`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DependencyPayload {
    pub source: SourceType,
    pub libraries: Vec<Dependency>,
}

/// A built dependency payload together with the limits it ran into.
#[derive(Debug, Clone)]
pub struct DependencyQuery {
    pub payload: DependencyPayload,
    pub warnings: Vec<LimitWarning>,
}

pub fn build_dependency_payload(input: &QueryInput, source: SourceType) -> Result<DependencyQuery> {
    let tokens = normalize_dependencies(input)?;
    let mut libraries = parse_dependencies(&tokens, source);
    let submitted = libraries.len();
    let mut warnings = Vec::new();

    if submitted > MAX_DEPENDENCIES {
        libraries.truncate(MAX_DEPENDENCIES);
        warnings.push(LimitWarning::Truncated {
            submitted,
            kept: MAX_DEPENDENCIES,
        });
    }

    if submitted > ACCURACY_THRESHOLD {
        warnings.push(LimitWarning::ReducedAccuracy { count: submitted });
    }

    Ok(DependencyQuery {
        payload: DependencyPayload { source, libraries },
        warnings,
    })
}

/// One banner as sent to `POST /api/v1/check-banners`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BannerRecord {
    pub banner: String,
    #[serde(rename = "type")]
    pub kind: BannerType,
}

/// Body of `POST /api/v1/check-banners`: a plain JSON list of records.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BannerPayload(pub Vec<BannerRecord>);

impl BannerPayload {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn build_banner_payload(input: &QueryInput, banner_type: BannerType) -> Result<BannerPayload> {
    let classifier = BannerClassifier::new();
    let records = normalize_banners(input)?
        .into_iter()
        .map(|banner| {
            let kind = classifier.resolve(&banner, banner_type);
            BannerRecord { banner, kind }
        })
        .collect();

    Ok(BannerPayload(records))
}
