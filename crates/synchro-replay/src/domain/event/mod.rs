//! # Event Model
//!
//! The replayed representation of one thread's execution:
//!
//! ```text
//! ThreadEventStream ─┬─ Event ─┬─ EventPayload
//!                    │         │    ├─ Computation { counters, read_set, write_set }
//!                    │         │    ├─ Communication { prerequisites }
//!                    │         │    └─ SynchronizationApi { primitive, target }
//!                    │         └─ SubEventQueue ── SubEvent ── Option<DependencyRecord>
//!                    └─ ...
//! ```
//!
//! Ownership is strictly tree-shaped. An event owns its dependency records
//! and sub-events by value; cross-thread edges are expressed only as
//! `(producer thread, producer event)` ids inside a record, never as
//! references, so no cycles or shared ownership can form.

pub mod types;
pub mod dependency;
pub mod sub_event;
pub mod queue;
pub mod model;
pub mod stream;

#[cfg(kani)]
mod proofs;

pub use types::{Address, EventId, ThreadId, Ticks};
pub use dependency::{DependencyRecord, Producer};
pub use sub_event::{RequestKind, SubEvent};
pub use queue::SubEventQueue;
pub use model::{ComputeCounters, Event, EventKind, EventPayload, SyncPrimitive};
pub use stream::ThreadEventStream;
