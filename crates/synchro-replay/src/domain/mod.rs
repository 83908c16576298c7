//! Domain Layer
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Domain Layer                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  Event Module                   Stats Module             │
//! │  ├─ ThreadEventStream           ├─ ThreadStats           │
//! │  ├─ Event / EventPayload        ├─ ThreadStatsSnapshot   │
//! │  ├─ SubEventQueue / SubEvent    └─ StatsRegistry         │
//! │  └─ DependencyRecord                                     │
//! │                                                          │
//! │  ReplayConfig                   ReplayError              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this layer blocks, spawns, or reads the clock. "Waiting" is
//! state on a sub-event that the external scheduler re-checks at its own
//! cadence.
//!
//! ```rust
//! use synchro_replay::domain::*;
//!
//! let prereq = DependencyRecord::remote(ThreadId::new(2), EventId::new(7), 0x1000, 8);
//! let mut event = Event::communication(ThreadId::new(0), EventId::new(1), vec![prereq.clone()]);
//! event.decompose().unwrap();
//!
//! let head = event.next_sub_event().unwrap();
//! assert_eq!(head.dependency(), Some(&prereq));
//! assert!(!head.has_fired());
//!
//! let mut stats = ThreadStats::new(ThreadId::new(0));
//! let done = event.pop_sub_event().unwrap();
//! stats.record_sub_event(&done, true, Ticks(12));
//! assert!(event.is_drained());
//! assert_eq!(stats.snapshot().shared_reads, 1);
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod stats;

pub use config::{QueueCapacity, ReplayConfig, DEFAULT_COMPUTE_GRANULE};
pub use error::{ErrorCategory, ReplayError, ReplayResult};
pub use event::{
    Address,
    ComputeCounters,
    DependencyRecord,
    Event,
    EventId,
    EventKind,
    EventPayload,
    Producer,
    RequestKind,
    SubEvent,
    SubEventQueue,
    SyncPrimitive,
    ThreadEventStream,
    ThreadId,
    Ticks,
};
pub use stats::{StatsRegistry, ThreadStats, ThreadStatsSnapshot};
