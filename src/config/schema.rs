//! Configuration schema definitions.
//!
//! This module defines the complete structure of an endpoint manifest.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::descriptor::EndpointDescriptor;

/// Root configuration: router settings plus the endpoint list.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RoutingConfig {
    /// Router behavior.
    pub router: RouterConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Registered endpoints with their annotations.
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Router behavior settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Cultures accepted by the route-value resolver.
    /// Empty means every culture is accepted.
    pub supported_cultures: Vec<String>,

    /// How conflicting annotations on one target are handled.
    pub ambiguity: AmbiguityPolicy,
}

/// Policy for two annotations competing for the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Keep the first-encountered annotation and log a warning.
    #[default]
    FirstWins,
    /// Fail the table build.
    Reject,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Pretty for development, JSON for machine parsing.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
