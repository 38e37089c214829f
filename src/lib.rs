pub mod client;
pub mod config;
pub mod report;
pub mod response;
pub mod session;

pub use client::{PattonClient, CHECK_BANNERS_PATH, CHECK_DEPENDENCIES_PATH};
pub use config::{ConfigError, ConfigOverlay, PattonConfig, RunningConfig, DEFAULT_HOST};

// Re-export core types for convenience
pub use patton_core::{
    BannerResult, BannerType, DependencyResult, DependencyVulns, OutputFormat, PattonError,
    QueryInput, SourceType,
};
pub use patton_parser::LimitWarning;
