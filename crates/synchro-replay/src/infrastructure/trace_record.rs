//! Trace Ingestion Descriptors
//!
//! The external trace reader decodes its storage format into these plain
//! serde types; [`RawEvent::into_event`] turns one into an owned [`Event`].
//! Descriptors are validated here only as far as the event model needs
//! (configuration, primitive codes, producer identities). Stream ordering is
//! checked by [`ThreadEventStream`](crate::domain::ThreadEventStream).

use crate::domain::config::ReplayConfig;
use crate::domain::error::{ReplayError, ReplayResult};
use crate::domain::event::{
    ComputeCounters, DependencyRecord, Event, EventId, SyncPrimitive, ThreadId,
};
use serde::{Deserialize, Serialize};

/// One memory access as recorded in the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDependency {
    /// Producer thread, absent for local accesses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer_thread: Option<u32>,
    /// Producer event, absent for local accesses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer_event: Option<u64>,
    /// Start address
    pub addr: u64,
    /// Length in bytes
    pub bytes: u32,
}

impl RawDependency {
    /// Convert into an owned record
    ///
    /// # Errors
    ///
    /// `IncompleteProducer` if only one of thread/event is present.
    pub fn into_record(self) -> ReplayResult<DependencyRecord> {
        match (self.producer_thread, self.producer_event) {
            (Some(thread), Some(event)) => Ok(DependencyRecord::remote(
                ThreadId::new(thread),
                EventId::new(event),
                self.addr,
                self.bytes,
            )),
            (None, None) => Ok(DependencyRecord::local(self.addr, self.bytes)),
            _ => Err(ReplayError::IncompleteProducer { address: self.addr }),
        }
    }
}

fn into_records(raw: Vec<RawDependency>) -> ReplayResult<Vec<DependencyRecord>> {
    raw.into_iter().map(RawDependency::into_record).collect()
}

/// One event descriptor, tagged by kind
///
/// ```rust
/// use synchro_replay::infrastructure::RawEvent;
/// use synchro_replay::domain::{EventKind, ReplayConfig};
///
/// let raw: RawEvent = serde_json::from_str(
///     r#"{ "kind": "synchronization", "thread_id": 1, "event_id": 4, "primitive": 5 }"#,
/// ).unwrap();
/// let event = raw.into_event(&ReplayConfig::default()).unwrap();
/// assert_eq!(event.kind(), EventKind::SynchronizationApi);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawEvent {
    /// Compute work and its memory accesses
    Computation {
        /// Owning thread
        thread_id: u32,
        /// Event id within the thread
        event_id: u64,
        /// Integer operations
        iops: u64,
        /// Floating-point operations
        flops: u64,
        /// Memory reads
        mem_reads: u64,
        /// Memory writes
        mem_writes: u64,
        /// Read accesses
        #[serde(default)]
        reads: Vec<RawDependency>,
        /// Write accesses
        #[serde(default)]
        writes: Vec<RawDependency>,
    },
    /// Values consumed from other threads
    Communication {
        /// Owning thread
        thread_id: u32,
        /// Event id within the thread
        event_id: u64,
        /// Producer writes to wait for
        #[serde(default)]
        prerequisites: Vec<RawDependency>,
    },
    /// Synchronization API call
    Synchronization {
        /// Owning thread
        thread_id: u32,
        /// Event id within the thread
        event_id: u64,
        /// Primitive trace code (1..=14)
        primitive: u32,
        /// Lock/barrier/semaphore identity
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<u64>,
    },
}

impl RawEvent {
    /// Build an owned event with `config` applied
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `config` fails [`ReplayConfig::validate`]
    /// - `UnknownSyncPrimitive` for an unrecognized primitive code
    /// - `IncompleteProducer` for a half-specified dependency
    pub fn into_event(self, config: &ReplayConfig) -> ReplayResult<Event> {
        config.validate()?;
        let event = match self {
            RawEvent::Computation {
                thread_id,
                event_id,
                iops,
                flops,
                mem_reads,
                mem_writes,
                reads,
                writes,
            } => Event::computation(
                ThreadId::new(thread_id),
                EventId::new(event_id),
                ComputeCounters::new(iops, flops, mem_reads, mem_writes),
                into_records(reads)?,
                into_records(writes)?,
            ),
            RawEvent::Communication {
                thread_id,
                event_id,
                prerequisites,
            } => Event::communication(
                ThreadId::new(thread_id),
                EventId::new(event_id),
                into_records(prerequisites)?,
            ),
            RawEvent::Synchronization {
                thread_id,
                event_id,
                primitive,
                address,
            } => Event::synchronization(
                ThreadId::new(thread_id),
                EventId::new(event_id),
                SyncPrimitive::from_code(primitive)?,
                address,
            ),
        };
        Ok(event.with_config(config))
    }
}
