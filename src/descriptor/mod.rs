//! Endpoint descriptors and the sources that enumerate them.
//!
//! # Data Flow
//! ```text
//! Endpoint metadata (in memory, or a TOML manifest on disk)
//!     → DescriptorSource::descriptors()
//!     → Vec<EndpointDescriptor>
//!     → routing::builder (precedence policy)
//! ```
//!
//! # Design Decisions
//! - Annotations are plain data computed ahead of time; the routing core never introspects
//! - Sources must be repeatable: a failed build is retried by calling them again
//! - Async so a source may later be backed by I/O without changing callers

pub mod file;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::routing::{RouteName, SourceError};

pub use file::FileDescriptorSource;

/// Culture-specific name for a controller or an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LocalizedRouteAnnotation {
    /// Opaque culture tag, e.g. "en-US".
    pub culture: String,
    /// Name exposed for that culture.
    pub template: String,
}

impl LocalizedRouteAnnotation {
    pub fn new(culture: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            culture: culture.into(),
            template: template.into(),
        }
    }
}

/// Culture-agnostic override name for a controller or an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PlainRouteAnnotation {
    pub template: String,
}

impl PlainRouteAnnotation {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

/// One registered endpoint with the annotations of its controller and action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointDescriptor {
    /// Canonical controller name.
    pub controller: String,

    /// Canonical action name.
    pub action: String,

    #[serde(default)]
    pub controller_localized: Vec<LocalizedRouteAnnotation>,

    /// Treated as zero-or-one.
    #[serde(default)]
    pub controller_plain: Vec<PlainRouteAnnotation>,

    #[serde(default)]
    pub action_localized: Vec<LocalizedRouteAnnotation>,

    /// Treated as zero-or-one.
    #[serde(default)]
    pub action_plain: Vec<PlainRouteAnnotation>,
}

impl EndpointDescriptor {
    /// Descriptor without any annotation.
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            ..Default::default()
        }
    }

    pub fn controller_localized(mut self, culture: &str, template: &str) -> Self {
        self.controller_localized
            .push(LocalizedRouteAnnotation::new(culture, template));
        self
    }

    pub fn controller_plain(mut self, template: &str) -> Self {
        self.controller_plain.push(PlainRouteAnnotation::new(template));
        self
    }

    pub fn action_localized(mut self, culture: &str, template: &str) -> Self {
        self.action_localized
            .push(LocalizedRouteAnnotation::new(culture, template));
        self
    }

    pub fn action_plain(mut self, template: &str) -> Self {
        self.action_plain.push(PlainRouteAnnotation::new(template));
        self
    }

    /// The canonical identity of this endpoint.
    pub fn canonical(&self) -> RouteName {
        RouteName::new(&self.controller, &self.action)
    }
}

/// Enumerates every registered endpoint.
///
/// Called once per table build. Ordering of the returned descriptors is not
/// significant to correctness, only to tie-breaking between conflicting entries.
#[async_trait]
pub trait DescriptorSource: Send + Sync {
    async fn descriptors(&self) -> Result<Vec<EndpointDescriptor>, SourceError>;
}

/// A fixed, in-memory descriptor list.
#[derive(Debug, Clone, Default)]
pub struct StaticDescriptorSource {
    descriptors: Vec<EndpointDescriptor>,
}

impl StaticDescriptorSource {
    pub fn new(descriptors: Vec<EndpointDescriptor>) -> Self {
        Self { descriptors }
    }
}

impl FromIterator<EndpointDescriptor> for StaticDescriptorSource {
    fn from_iter<I: IntoIterator<Item = EndpointDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl DescriptorSource for StaticDescriptorSource {
    async fn descriptors(&self) -> Result<Vec<EndpointDescriptor>, SourceError> {
        Ok(self.descriptors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let d = EndpointDescriptor::new("Home", "Index")
            .controller_localized("cs-CZ", "Domu")
            .action_localized("cs-CZ", "Uvod")
            .action_plain("Start");

        assert_eq!(d.canonical(), RouteName::new("Home", "Index"));
        assert_eq!(d.controller_localized.len(), 1);
        assert!(d.controller_plain.is_empty());
        assert_eq!(d.action_plain[0].template, "Start");
    }

    #[test]
    fn test_deserialize_descriptor() {
        let toml_str = r#"
            controller = "Home"
            action = "Index"
            controller_localized = [{ culture = "cs-CZ", template = "Domu" }]
            action_plain = ["Start"]
        "#;
        let d: EndpointDescriptor = toml::from_str(toml_str).unwrap();
        assert_eq!(d.controller_localized[0], LocalizedRouteAnnotation::new("cs-CZ", "Domu"));
        assert_eq!(d.action_plain, vec![PlainRouteAnnotation::new("Start")]);
        assert!(d.action_localized.is_empty());
    }

    #[tokio::test]
    async fn test_static_source_is_repeatable() {
        let source: StaticDescriptorSource =
            vec![EndpointDescriptor::new("Home", "Index")].into_iter().collect();
        let first = source.descriptors().await.unwrap();
        let second = source.descriptors().await.unwrap();
        assert_eq!(first, second);
    }
}
