//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject empty names, cultures and templates
//! - Reject templates that would split into several URL segments
//! - Detect endpoints registered twice
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RoutingConfig → Result<(), Vec<ValidationError>>
//! - Conflicting same-culture annotations are not rejected here; that is the
//!   builder's ambiguity policy

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RoutingConfig;
use crate::descriptor::EndpointDescriptor;

/// A single semantic problem in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("endpoint #{index}: {field} must not be empty")]
    EmptyName { index: usize, field: &'static str },

    #[error("endpoint {endpoint}: {field} has an empty culture")]
    EmptyCulture { endpoint: String, field: &'static str },

    #[error("endpoint {endpoint}: {field} has an empty template")]
    EmptyTemplate { endpoint: String, field: &'static str },

    #[error("endpoint {endpoint}: {field} template {template:?} must be a single path segment")]
    MultiSegmentTemplate {
        endpoint: String,
        field: &'static str,
        template: String,
    },

    #[error("endpoint {0} is registered more than once")]
    DuplicateEndpoint(String),

    #[error("router.supported_cultures contains an empty culture")]
    EmptySupportedCulture,

    #[error("router.supported_cultures lists {0:?} more than once")]
    DuplicateSupportedCulture(String),
}

/// Validate a parsed manifest, collecting every problem found.
pub fn validate_config(config: &RoutingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen_cultures = HashSet::new();
    for culture in &config.router.supported_cultures {
        if culture.trim().is_empty() {
            errors.push(ValidationError::EmptySupportedCulture);
        } else if !seen_cultures.insert(culture.as_str()) {
            errors.push(ValidationError::DuplicateSupportedCulture(culture.clone()));
        }
    }

    let mut seen_endpoints = HashSet::new();
    for (index, endpoint) in config.endpoints.iter().enumerate() {
        let mut named = true;
        if endpoint.controller.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index, field: "controller" });
            named = false;
        }
        if endpoint.action.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index, field: "action" });
            named = false;
        }
        if !named {
            continue;
        }

        let key = endpoint.canonical().to_string();
        if !seen_endpoints.insert((endpoint.controller.as_str(), endpoint.action.as_str())) {
            errors.push(ValidationError::DuplicateEndpoint(key.clone()));
        }

        validate_annotations(&key, endpoint, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_annotations(key: &str, endpoint: &EndpointDescriptor, errors: &mut Vec<ValidationError>) {
    let localized = [
        ("controller_localized", &endpoint.controller_localized),
        ("action_localized", &endpoint.action_localized),
    ];
    for (field, annotations) in localized {
        for annotation in annotations {
            if annotation.culture.trim().is_empty() {
                errors.push(ValidationError::EmptyCulture {
                    endpoint: key.to_string(),
                    field,
                });
            }
            check_template(key, field, &annotation.template, errors);
        }
    }

    let plain = [
        ("controller_plain", &endpoint.controller_plain),
        ("action_plain", &endpoint.action_plain),
    ];
    for (field, annotations) in plain {
        for annotation in annotations {
            check_template(key, field, &annotation.template, errors);
        }
    }
}

fn check_template(key: &str, field: &'static str, template: &str, errors: &mut Vec<ValidationError>) {
    if template.trim().is_empty() {
        errors.push(ValidationError::EmptyTemplate {
            endpoint: key.to_string(),
            field,
        });
    } else if template.contains('/') {
        errors.push(ValidationError::MultiSegmentTemplate {
            endpoint: key.to_string(),
            field,
            template: template.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::EndpointDescriptor;

    fn config_with(endpoints: Vec<EndpointDescriptor>) -> RoutingConfig {
        RoutingConfig {
            endpoints,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let config = config_with(vec![
            EndpointDescriptor::new("Home", "Index")
                .controller_localized("cs-CZ", "Domu")
                .action_localized("cs-CZ", "Uvod"),
            EndpointDescriptor::new("Home", "Privacy").action_plain("Soukromi"),
        ]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = config_with(vec![
            EndpointDescriptor::new("Home", "Index")
                .controller_localized("", "Domu")
                .action_plain("a/b"),
            EndpointDescriptor::new("Home", "Privacy").controller_plain(" "),
        ]);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::EmptyCulture {
            endpoint: "Home/Index".into(),
            field: "controller_localized",
        }));
        assert!(errors.contains(&ValidationError::MultiSegmentTemplate {
            endpoint: "Home/Index".into(),
            field: "action_plain",
            template: "a/b".into(),
        }));
        assert!(errors.contains(&ValidationError::EmptyTemplate {
            endpoint: "Home/Privacy".into(),
            field: "controller_plain",
        }));
    }

    #[test]
    fn test_duplicate_endpoint() {
        let config = config_with(vec![
            EndpointDescriptor::new("Home", "Index"),
            EndpointDescriptor::new("Home", "Index"),
        ]);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DuplicateEndpoint("Home/Index".into())]);
    }

    #[test]
    fn test_supported_cultures() {
        let mut config = RoutingConfig::default();
        config.router.supported_cultures = vec!["en-US".into(), "".into(), "en-US".into()];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptySupportedCulture,
                ValidationError::DuplicateSupportedCulture("en-US".into()),
            ]
        );
    }
}
