//! Statistics

pub mod metrics;

pub use metrics::{IndexStats, RoutingStats};
