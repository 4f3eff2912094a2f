//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing subsystem produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (build and query counters)
//!
//! Consumers:
//!     → Log output (stderr, pretty or JSON)
//!     → Whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Metrics go through the `metrics` facade; no exporter is installed here
//! - Metrics are cheap (no-ops until a recorder exists)

pub mod logging;
pub mod metrics;
