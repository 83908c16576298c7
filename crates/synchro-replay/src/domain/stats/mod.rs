//! Per-thread replay statistics
//!
//! The engine folds every retired sub-event into its thread's aggregator;
//! reporting reads immutable snapshots.

pub mod aggregator;
pub mod registry;

pub use aggregator::{ThreadStats, ThreadStatsSnapshot};
pub use registry::StatsRegistry;
