//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! endpoint manifest (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RoutingConfig (validated, immutable)
//!     → endpoints feed the descriptor source, router settings feed the router
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs re-validates the manifest
//!     → LocalizedRouter::rebuild_with (new router settings, atomic table swap)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal manifests
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::AmbiguityPolicy;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::RouterConfig;
pub use schema::RoutingConfig;
