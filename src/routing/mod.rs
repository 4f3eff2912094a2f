//! Localized routing subsystem.
//!
//! # Data Flow
//! ```text
//! Query (culture, controller, action, direction)
//!     → router.rs (LocalizedRouter::query)
//!     → guard.rs (table installed? otherwise build once)
//!     → table.rs (exact culture, then culture-agnostic fallback)
//!     → Return: RouteName or unresolved
//!
//! Table Compilation (on first query or explicit rebuild):
//!     DescriptorSource::descriptors()
//!     → builder.rs (precedence policy, de-duplication)
//!     → Index by (culture, name) per direction
//!     → Freeze as immutable RouteTable, atomic swap
//! ```
//!
//! # Design Decisions
//! - Tables are immutable once installed; a rebuild swaps a new one in
//! - Deterministic: same descriptors always produce the same table
//! - First match wins (descriptor order, overrides before identity)

pub mod builder;
pub mod error;
pub mod guard;
pub mod router;
pub mod table;
pub mod types;

pub use builder::build_entries;
pub use error::{AnnotationTarget, BuildError, RoutingError, RoutingResult, SourceError};
pub use guard::TableState;
pub use router::LocalizedRouter;
pub use table::RouteTable;
pub use types::{Direction, RouteEntry, RouteName};
