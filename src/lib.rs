//! Localized route resolution library.
//!
//! Maps canonical controller/action names to per-culture localized names and
//! back, from declarative endpoint metadata.

pub mod config;
pub mod descriptor;
pub mod observability;
pub mod routing;
pub mod values;

pub use config::schema::RoutingConfig;
pub use descriptor::{DescriptorSource, EndpointDescriptor};
pub use routing::{Direction, LocalizedRouter, RouteName, RoutingError};
pub use values::RouteValueResolver;
