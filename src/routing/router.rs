//! Localized route resolution.
//!
//! # Responsibilities
//! - Own the descriptor source and the build-once table gate
//! - Answer direction-aware queries with culture fallback
//! - Expose explicit rebuild/reset for hot reload
//! - Hold the live router settings; a reload swaps them before rebuilding
//!
//! # Design Decisions
//! - Cheap to clone; clones share one table
//! - "No match" is `Ok(None)`, only build failures are errors
//! - The table is built lazily on the first query, not at construction

use std::sync::Arc;

use arc_swap::ArcSwap;
use futures_util::future::{BoxFuture, FutureExt};

use crate::config::{AmbiguityPolicy, RouterConfig};
use crate::descriptor::DescriptorSource;
use crate::observability::metrics;
use crate::routing::builder::build_entries;
use crate::routing::error::{BuildError, RoutingResult};
use crate::routing::guard::{TableGuard, TableState};
use crate::routing::table::RouteTable;
use crate::routing::types::{Direction, RouteName};

/// Entry point for localized route lookups.
#[derive(Clone)]
pub struct LocalizedRouter {
    source: Arc<dyn DescriptorSource>,
    settings: Arc<ArcSwap<RouterConfig>>,
    guard: Arc<TableGuard>,
}

impl LocalizedRouter {
    /// Router with the default (first-wins) ambiguity policy.
    pub fn new(source: Arc<dyn DescriptorSource>) -> Self {
        Self::with_policy(source, AmbiguityPolicy::default())
    }

    pub fn with_policy(source: Arc<dyn DescriptorSource>, policy: AmbiguityPolicy) -> Self {
        let config = RouterConfig {
            ambiguity: policy,
            ..RouterConfig::default()
        };
        Self::from_config(&config, source)
    }

    pub fn from_config(config: &RouterConfig, source: Arc<dyn DescriptorSource>) -> Self {
        Self {
            source,
            settings: Arc::new(ArcSwap::from_pointee(config.clone())),
            guard: TableGuard::new(),
        }
    }

    /// Translate a name in the given direction.
    ///
    /// Looks in `culture` first, then in the culture-agnostic scope.
    /// Returns `Ok(None)` when neither has a match.
    pub async fn query(
        &self,
        culture: Option<&str>,
        controller: &str,
        action: &str,
        direction: Direction,
    ) -> RoutingResult<Option<RouteName>> {
        let table = self.table().await?;
        let resolved = table.resolve(direction, culture, controller, action).cloned();

        match &resolved {
            Some(name) => {
                tracing::trace!(
                    direction = direction.as_str(),
                    culture = culture.unwrap_or("<none>"),
                    from = %RouteName::new(controller, action),
                    to = %name,
                    "Route resolved"
                );
                metrics::record_query(direction, "resolved");
            }
            None => {
                tracing::debug!(
                    direction = direction.as_str(),
                    culture = culture.unwrap_or("<none>"),
                    controller,
                    action,
                    "Route unresolved"
                );
                metrics::record_query(direction, "unresolved");
            }
        }
        Ok(resolved)
    }

    /// Localized name in, canonical name out.
    pub async fn translated_to_original(
        &self,
        culture: Option<&str>,
        controller: &str,
        action: &str,
    ) -> RoutingResult<Option<RouteName>> {
        self.query(culture, controller, action, Direction::TranslatedToOriginal)
            .await
    }

    /// Canonical name in, localized name out.
    pub async fn original_to_translated(
        &self,
        culture: Option<&str>,
        controller: &str,
        action: &str,
    ) -> RoutingResult<Option<RouteName>> {
        self.query(culture, controller, action, Direction::OriginalToTranslated)
            .await
    }

    /// The installed table, building it first if needed.
    pub async fn table(&self) -> RoutingResult<Arc<RouteTable>> {
        self.guard.get_or_build(self.build_fn()).await
    }

    /// Build from a fresh descriptor snapshot and swap the result in.
    /// On failure the previous table stays installed.
    pub async fn rebuild(&self) -> RoutingResult<Arc<RouteTable>> {
        self.guard.rebuild(self.build_fn()).await
    }

    /// Swap in new router settings, then rebuild under them.
    pub async fn rebuild_with(&self, config: RouterConfig) -> RoutingResult<Arc<RouteTable>> {
        tracing::debug!(
            ambiguity = ?config.ambiguity,
            supported_cultures = config.supported_cultures.len(),
            "Router settings replaced"
        );
        self.settings.store(Arc::new(config));
        self.rebuild().await
    }

    /// Forget the installed table; the next query rebuilds.
    pub fn reset(&self) {
        self.guard.reset();
    }

    pub fn state(&self) -> TableState {
        self.guard.state()
    }

    pub fn is_ready(&self) -> bool {
        self.guard.current().is_some()
    }

    pub fn policy(&self) -> AmbiguityPolicy {
        self.settings.load().ambiguity
    }

    /// The live settings, including the supported-culture list.
    pub fn settings(&self) -> Arc<RouterConfig> {
        self.settings.load_full()
    }

    fn build_fn(&self) -> impl FnOnce() -> BoxFuture<'static, Result<RouteTable, BuildError>> {
        let source = Arc::clone(&self.source);
        let policy = self.policy();
        move || {
            async move {
                let descriptors = source.descriptors().await?;
                let entries = build_entries(&descriptors, policy)?;
                tracing::debug!(
                    endpoints = descriptors.len(),
                    entries = entries.len(),
                    "Route entries compiled"
                );
                Ok::<_, BuildError>(RouteTable::new(entries))
            }
            .boxed()
        }
    }
}

impl std::fmt::Debug for LocalizedRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizedRouter")
            .field("policy", &self.policy())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
