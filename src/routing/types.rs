//! Route identities and table entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A controller/action pair, canonical or localized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteName {
    pub controller: String,
    pub action: String,
}

impl RouteName {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.controller, self.action)
    }
}

/// One row of the route table.
///
/// `culture == None` marks the culture-agnostic scope: either the identity
/// entry of an endpoint (`original == translated`) or a plain override that
/// applies to every culture without a dedicated entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteEntry {
    pub culture: Option<String>,
    pub original: RouteName,
    pub translated: RouteName,
}

impl RouteEntry {
    /// Identity entry for a canonical name.
    pub fn identity(name: RouteName) -> Self {
        Self {
            culture: None,
            translated: name.clone(),
            original: name,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.culture.is_none() && self.original == self.translated
    }
}

/// Which way a query translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Canonical name in, localized name out (link generation).
    OriginalToTranslated,
    /// Localized name in, canonical name out (inbound URL rewriting).
    TranslatedToOriginal,
}

impl Direction {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::OriginalToTranslated => "original_to_translated",
            Direction::TranslatedToOriginal => "translated_to_original",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_entry() {
        let entry = RouteEntry::identity(RouteName::new("Home", "Index"));
        assert!(entry.is_identity());
        assert_eq!(entry.original, entry.translated);
        assert!(entry.culture.is_none());
    }

    #[test]
    fn test_culture_entry_is_not_identity() {
        let entry = RouteEntry {
            culture: Some("en-US".into()),
            original: RouteName::new("Home", "Index"),
            translated: RouteName::new("Home", "Index"),
        };
        assert!(!entry.is_identity());
    }

    #[test]
    fn test_route_name_display() {
        assert_eq!(RouteName::new("Domu", "Uvod").to_string(), "Domu/Uvod");
    }
}
