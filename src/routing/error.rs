//! Error definitions for building and querying the route table.

use std::sync::Arc;
use thiserror::Error;

/// Descriptor enumeration failed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading the endpoint manifest failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The endpoint manifest is not valid TOML for the expected schema.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The endpoint manifest parsed but failed semantic checks.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Any other source-specific failure.
    #[error("Descriptor source failed: {0}")]
    Other(String),
}

/// Which annotation list an ambiguity was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationTarget {
    Controller,
    Action,
}

impl std::fmt::Display for AnnotationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotationTarget::Controller => f.write_str("controller"),
            AnnotationTarget::Action => f.write_str("action"),
        }
    }
}

/// Building the route table failed.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Conflicting annotations on one target, rejected by policy.
    /// `culture` is `None` for conflicting plain annotations.
    #[error(
        "Ambiguous {target} annotations on {controller}/{action} for culture {}",
        .culture.as_deref().unwrap_or("<any>")
    )]
    AmbiguousAnnotation {
        controller: String,
        action: String,
        target: AnnotationTarget,
        culture: Option<String>,
    },
}

/// Errors surfaced to callers of the router.
#[derive(Debug, Clone, Error)]
pub enum RoutingError {
    /// The table build failed. Shared so every waiter of the same build
    /// receives the same error.
    #[error("Route table build failed: {0}")]
    Build(Arc<BuildError>),

    /// The request culture is missing or not in the supported list.
    #[error("Unsupported culture: {0:?}")]
    UnsupportedCulture(String),
}

impl From<BuildError> for RoutingError {
    fn from(err: BuildError) -> Self {
        RoutingError::Build(Arc::new(err))
    }
}

/// Result type for router operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildError::AmbiguousAnnotation {
            controller: "Home".into(),
            action: "Index".into(),
            target: AnnotationTarget::Action,
            culture: Some("cs-CZ".into()),
        };
        assert_eq!(
            err.to_string(),
            "Ambiguous action annotations on Home/Index for culture cs-CZ"
        );

        let err = SourceError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation failed: a, b");
    }

    #[test]
    fn test_routing_error_shares_build_error() {
        let err: RoutingError = BuildError::from(SourceError::Other("boom".into())).into();
        let cloned = err.clone();
        match (err, cloned) {
            (RoutingError::Build(a), RoutingError::Build(b)) => assert!(Arc::ptr_eq(&a, &b)),
            _ => panic!("expected build errors"),
        }
    }
}
