//! Route-value rewriting for URL-rewriting and link-generation layers.
//!
//! # Responsibilities
//! - Map inbound localized route values to canonical ones before dispatch
//! - Map canonical route values to localized ones for link generation
//! - Check the request culture against the supported list
//!
//! # Design Decisions
//! - Works on a plain key/value map, no HTTP types
//! - Values without culture, controller and action pass through untouched
//! - Unresolved names are kept as they are (treated as already canonical)
//! - The supported-culture list is read from the router's live settings, so a
//!   manifest reload applies to both

use std::collections::BTreeMap;

use crate::routing::{Direction, LocalizedRouter, RoutingError, RoutingResult};

pub const CULTURE_KEY: &str = "culture";
pub const CONTROLLER_KEY: &str = "controller";
pub const ACTION_KEY: &str = "action";

/// Route values extracted from a matched URL template.
pub type RouteValues = BTreeMap<String, String>;

/// Rewrites the controller/action pair of a route-value map.
#[derive(Debug, Clone)]
pub struct RouteValueResolver {
    router: LocalizedRouter,
}

impl RouteValueResolver {
    pub fn new(router: LocalizedRouter) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &LocalizedRouter {
        &self.router
    }

    /// Localized values in, canonical values out.
    pub async fn to_canonical(&self, values: RouteValues) -> RoutingResult<RouteValues> {
        self.rewrite(values, Direction::TranslatedToOriginal).await
    }

    /// Canonical values in, localized values out.
    pub async fn to_localized(&self, values: RouteValues) -> RoutingResult<RouteValues> {
        self.rewrite(values, Direction::OriginalToTranslated).await
    }

    /// Fail unless the values carry a supported culture.
    pub fn validate_culture(&self, values: &RouteValues) -> RoutingResult<()> {
        if self.router.settings().supported_cultures.is_empty() {
            return Ok(());
        }

        let culture = values.get(CULTURE_KEY).map(String::as_str).unwrap_or_default();
        if culture.is_empty() || !self.is_supported(culture) {
            return Err(RoutingError::UnsupportedCulture(culture.to_string()));
        }
        Ok(())
    }

    /// Tags compare ASCII case-insensitively (`cs-cz` matches `cs-CZ`).
    /// An empty supported list accepts every culture.
    pub fn is_supported(&self, culture: &str) -> bool {
        let settings = self.router.settings();
        settings.supported_cultures.is_empty()
            || settings
                .supported_cultures
                .iter()
                .any(|c| c.eq_ignore_ascii_case(culture))
    }

    async fn rewrite(&self, mut values: RouteValues, direction: Direction) -> RoutingResult<RouteValues> {
        let (Some(culture), Some(controller), Some(action)) = (
            values.get(CULTURE_KEY),
            values.get(CONTROLLER_KEY),
            values.get(ACTION_KEY),
        ) else {
            return Ok(values);
        };

        let resolved = self
            .router
            .query(Some(culture), controller, action, direction)
            .await?;

        if let Some(name) = resolved {
            values.insert(CONTROLLER_KEY.to_string(), name.controller);
            values.insert(ACTION_KEY.to_string(), name.action);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouterConfig;
    use crate::descriptor::{EndpointDescriptor, StaticDescriptorSource};
    use std::sync::Arc;

    fn config(supported: &[&str]) -> RouterConfig {
        RouterConfig {
            supported_cultures: supported.iter().map(|s| s.to_string()).collect(),
            ..RouterConfig::default()
        }
    }

    fn resolver(supported: &[&str]) -> RouteValueResolver {
        let source = StaticDescriptorSource::new(vec![EndpointDescriptor::new("Home", "Index")
            .controller_localized("cs-CZ", "Domu")
            .action_localized("cs-CZ", "Uvod")]);
        RouteValueResolver::new(LocalizedRouter::from_config(&config(supported), Arc::new(source)))
    }

    fn values(pairs: &[(&str, &str)]) -> RouteValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_to_canonical_rewrites_and_keeps_extra_values() {
        let out = resolver(&[])
            .to_canonical(values(&[
                ("culture", "cs-CZ"),
                ("controller", "Domu"),
                ("action", "Uvod"),
                ("id", "42"),
            ]))
            .await
            .unwrap();

        assert_eq!(out["controller"], "Home");
        assert_eq!(out["action"], "Index");
        assert_eq!(out["id"], "42");
    }

    #[tokio::test]
    async fn test_to_localized() {
        let out = resolver(&[])
            .to_localized(values(&[("culture", "cs-CZ"), ("controller", "Home"), ("action", "Index")]))
            .await
            .unwrap();
        assert_eq!(out["controller"], "Domu");
        assert_eq!(out["action"], "Uvod");
    }

    #[tokio::test]
    async fn test_incomplete_values_pass_through_without_build() {
        let r = resolver(&[]);
        let input = values(&[("controller", "Domu"), ("action", "Uvod")]);
        let out = r.to_canonical(input.clone()).await.unwrap();
        assert_eq!(out, input);
        assert!(!r.router().is_ready());
    }

    #[tokio::test]
    async fn test_unresolved_names_are_kept() {
        let input = values(&[("culture", "cs-CZ"), ("controller", "Blog"), ("action", "Post")]);
        let out = resolver(&[]).to_canonical(input.clone()).await.unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_validate_culture() {
        let r = resolver(&["en-US", "cs-CZ"]);
        assert!(r.validate_culture(&values(&[("culture", "cs-CZ")])).is_ok());
        assert!(matches!(
            r.validate_culture(&values(&[("culture", "de-DE")])),
            Err(RoutingError::UnsupportedCulture(c)) if c == "de-DE"
        ));
        assert!(r.validate_culture(&values(&[("culture", "")])).is_err());
        assert!(r.validate_culture(&values(&[])).is_err());

        let open = resolver(&[]);
        assert!(open.validate_culture(&values(&[])).is_ok());
        assert!(open.is_supported("anything"));
    }

    #[test]
    fn test_culture_match_ignores_case() {
        let r = resolver(&["en-US", "cs-CZ"]);
        assert!(r.is_supported("cs-cz"));
        assert!(r.validate_culture(&values(&[("culture", "EN-us")])).is_ok());
        assert!(!r.is_supported("cs"));
    }

    #[tokio::test]
    async fn test_reloaded_cultures_apply() {
        let r = resolver(&["en-US"]);
        assert!(!r.is_supported("cs-CZ"));

        r.router().rebuild_with(config(&["en-US", "cs-CZ"])).await.unwrap();
        assert!(r.is_supported("cs-CZ"));
    }
}
