//! Query normalization and payload building for the Patton client.
//!
//! This crate provides:
//! - Input normalization (string or list → ordered tokens)
//! - Dependency token parsing (`name:version`)
//! - Banner classification (SSH, HTTP, FTP, SMTP)
//! - Request payload building with the server's soft item limits

mod banner;
mod dependency;
mod normalize;
mod payload;

pub use banner::BannerClassifier;
pub use dependency::{parse_dependencies, Dependency};
pub use normalize::{normalize_banners, normalize_dependencies};
pub use payload::{
    build_banner_payload, build_dependency_payload, BannerPayload, BannerRecord,
    DependencyPayload, DependencyQuery, LimitWarning, ACCURACY_THRESHOLD, MAX_DEPENDENCIES,
};
