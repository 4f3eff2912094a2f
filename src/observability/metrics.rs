//! Metrics collection.
//!
//! # Metrics
//! - `localized_routing_builds_total` (counter): table builds by outcome
//! - `localized_routing_build_duration_seconds` (histogram): build latency
//! - `localized_routing_table_entries` (gauge): entries in the installed table
//! - `localized_routing_queries_total` (counter): queries by direction, outcome

use std::time::Duration;

use crate::routing::Direction;

pub fn record_build(outcome: &'static str, elapsed: Duration) {
    metrics::counter!("localized_routing_builds_total", "outcome" => outcome).increment(1);
    metrics::histogram!("localized_routing_build_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_table_entries(count: usize) {
    metrics::gauge!("localized_routing_table_entries").set(count as f64);
}

pub fn record_query(direction: Direction, outcome: &'static str) {
    metrics::counter!(
        "localized_routing_queries_total",
        "direction" => direction.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}
