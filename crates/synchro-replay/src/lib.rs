//! Synchro Replay - Trace Event Model
//!
//! # Overview
//!
//! `synchro-replay` defines how a captured multithreaded execution is
//! represented while it is replayed on an architecture-level performance
//! simulator. Each simulated thread is an ordered stream of events:
//!
//! - **Computation** events carry IOPS/FLOPS/memory counters plus the
//!   records they read and write.
//! - **Communication** events carry producer → consumer dependency records
//!   naming another thread's event.
//! - **SynchronizationAPI** events name a lock, barrier, condition variable,
//!   semaphore, or thread create/join call.
//!
//! The replay engine decomposes an event into sub-events, pops them one by
//! one (requeueing any whose dependency is not yet satisfied), and folds the
//! retired work into per-thread statistics.
//!
//! # Layers
//!
//! - **Domain**: the event model, statistics, configuration and errors
//! - **Infrastructure**: serde descriptors the trace reader fills in
//!
//! Reading trace storage, executing memory requests, choosing which thread
//! advances, and computing cycle counts all live outside this crate.
//!
//! # Usage
//!
//! ```rust
//! use synchro_replay::{ComputeCounters, Event, EventId, ThreadId, ThreadStats, Ticks};
//!
//! let mut event = Event::computation(
//!     ThreadId::new(0),
//!     EventId::new(1),
//!     ComputeCounters::new(2, 1, 1, 0),
//!     vec![],
//!     vec![],
//! );
//! assert_eq!(event.decompose().unwrap(), 4);
//!
//! let mut stats = ThreadStats::new(ThreadId::new(0));
//! while !event.is_drained() {
//!     let sub = event.pop_sub_event().unwrap();
//!     stats.record_sub_event(&sub, false, Ticks(1));
//! }
//! assert_eq!(stats.snapshot().sub_events_retired, 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod domain;
pub mod infrastructure;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Re-export Primary Types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// Event model
pub use domain::{
    ComputeCounters,
    DependencyRecord,
    Event,
    EventId,
    EventKind,
    EventPayload,
    RequestKind,
    SubEvent,
    SyncPrimitive,
    ThreadEventStream,
    ThreadId,
    Ticks,
};

// Statistics
pub use domain::{StatsRegistry, ThreadStats, ThreadStatsSnapshot};

// Configuration and errors
pub use domain::{ErrorCategory, QueueCapacity, ReplayConfig, ReplayError, ReplayResult};

// Ingestion
pub use infrastructure::{RawDependency, RawEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
