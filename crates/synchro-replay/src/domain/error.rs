//! Replay Error Types
//!
//! Every error is local and synchronous. Nothing here is retried or
//! swallowed internally; the replay loop decides what to do with it.

use super::event::{EventId, EventKind, ThreadId};

/// Broad class of a [`ReplayError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Operation not valid for the event's kind or lifecycle stage
    InvalidState,
    /// Pop on an empty sub-event queue
    EmptyQueue,
    /// Capacity or configuration value out of range
    Configuration,
    /// Trace descriptor rejected while building an event
    Ingest,
}

/// Errors raised by the event model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Invalid state
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    /// The event's kind has no decomposition policy
    #[error("No decomposition policy for {kind} event {event_id} on {thread_id}")]
    NoDecompositionPolicy {
        /// Kind of the rejected event
        kind: EventKind,
        /// Rejected event
        event_id: EventId,
        /// Owning thread
        thread_id: ThreadId,
    },

    /// Push-back on a queue that was closed after materialization
    #[error("Sub-event queue is closed to new work")]
    QueueClosed,

    /// Requeue attempted before the event was decomposed
    #[error("Event {event_id} has not been decomposed yet")]
    NotMaterialized {
        /// Event that was not yet decomposed
        event_id: EventId,
    },

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Empty queue
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    /// Pop on an empty sub-event queue
    #[error("Sub-event queue of event {event_id} is empty")]
    EmptyQueue {
        /// Event whose queue was empty
        event_id: EventId,
    },

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Configuration
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    /// Fixed-capacity queue would overflow
    #[error("Sub-event queue overflow: {requested} entries exceed capacity {capacity}")]
    QueueOverflow {
        /// Configured capacity
        capacity: usize,
        /// Entries the queue would have held
        requested: usize,
    },

    /// Growable queue could not reserve room for a decomposed batch
    #[error("Sub-event queue cannot reserve {requested} entries")]
    QueueAllocation {
        /// Entries the queue would have held
        requested: usize,
    },

    /// Configuration value out of range or unparsable
    #[error("Invalid replay configuration: {0}")]
    InvalidConfig(String),

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Ingest
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    /// Trace code does not name a synchronization primitive
    #[error("Unknown synchronization primitive code: {0}")]
    UnknownSyncPrimitive(u32),

    /// Only one half of a producer identity was given
    #[error("Dependency at {address:#x} has an incomplete producer identity")]
    IncompleteProducer {
        /// Address of the malformed record
        address: u64,
    },

    /// Event id does not advance the thread's stream
    #[error("Event {received} on {thread_id} does not follow {last}")]
    NonMonotonicEventId {
        /// Stream owner
        thread_id: ThreadId,
        /// Last accepted id
        last: EventId,
        /// Rejected id
        received: EventId,
    },

    /// Event belongs to a different thread than the stream
    #[error("Event {event_id} belongs to {received}, not {expected}")]
    ThreadMismatch {
        /// Stream owner
        expected: ThreadId,
        /// Thread named by the event
        received: ThreadId,
        /// Rejected event
        event_id: EventId,
    },
}

impl ReplayError {
    /// Category of this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NoDecompositionPolicy { .. } | Self::QueueClosed | Self::NotMaterialized { .. } => {
                ErrorCategory::InvalidState
            }
            Self::EmptyQueue { .. } => ErrorCategory::EmptyQueue,
            Self::QueueOverflow { .. } | Self::QueueAllocation { .. } | Self::InvalidConfig(_) => {
                ErrorCategory::Configuration
            }
            Self::UnknownSyncPrimitive(_)
            | Self::IncompleteProducer { .. }
            | Self::NonMonotonicEventId { .. }
            | Self::ThreadMismatch { .. } => ErrorCategory::Ingest,
        }
    }
}

/// Result alias for replay operations
pub type ReplayResult<T> = Result<T, ReplayError>;
