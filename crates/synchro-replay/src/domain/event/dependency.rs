//! Dependency Records
//!
//! A dependency record describes one memory access an event makes. In its
//! "remote" form it names the producer event (on another thread) whose write
//! a consumer must observe before proceeding. In its "local" form there is
//! no producer at all, only an address range.
//!
//! Records are immutable values. An [`Event`](super::Event) owns its records
//! exclusively; sub-events that carry a message hold their own copy.

use super::types::{Address, EventId, ThreadId};
use std::fmt;

/// Identity of the producer side of a cross-thread dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Producer {
    /// Thread that performed the write
    pub thread_id: ThreadId,
    /// Event (within that thread) that performed the write
    pub event_id: EventId,
}

/// Descriptor of a memory access, optionally tied to a producer event
///
/// # Example
///
/// ```rust
/// use synchro_replay::domain::event::{DependencyRecord, EventId, ThreadId};
///
/// let remote = DependencyRecord::remote(ThreadId::new(2), EventId::new(7), 0x1000, 8);
/// assert_eq!(remote.producer_thread(), Some(ThreadId::new(2)));
///
/// let local = DependencyRecord::local(0x1000, 8);
/// assert!(local.is_local());
/// assert_ne!(local, remote);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRecord {
    producer: Option<Producer>,
    address: Address,
    byte_len: u32,
}

impl DependencyRecord {
    /// Create a record for a write produced by another thread's event
    pub const fn remote(
        producer_thread: ThreadId,
        producer_event: EventId,
        address: Address,
        byte_len: u32,
    ) -> Self {
        Self {
            producer: Some(Producer {
                thread_id: producer_thread,
                event_id: producer_event,
            }),
            address,
            byte_len,
        }
    }

    /// Create a record for a purely local access (no producer)
    pub const fn local(address: Address, byte_len: u32) -> Self {
        Self {
            producer: None,
            address,
            byte_len,
        }
    }

    /// Producer identity, `None` for local records
    #[inline]
    pub const fn producer(&self) -> Option<Producer> {
        self.producer
    }

    /// Producer thread, `None` for local records
    #[inline]
    pub fn producer_thread(&self) -> Option<ThreadId> {
        self.producer.map(|p| p.thread_id)
    }

    /// Producer event, `None` for local records
    #[inline]
    pub fn producer_event(&self) -> Option<EventId> {
        self.producer.map(|p| p.event_id)
    }

    /// Start address of the access
    #[inline]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Length of the access in bytes
    #[inline]
    pub const fn byte_len(&self) -> u32 {
        self.byte_len
    }

    /// True if this record has no producer
    #[inline]
    pub const fn is_local(&self) -> bool {
        self.producer.is_none()
    }

    /// True if this record names a producer event
    #[inline]
    pub const fn is_remote(&self) -> bool {
        self.producer.is_some()
    }

    /// Exclusive end address of the access
    #[inline]
    pub const fn end_address(&self) -> Address {
        self.address.saturating_add(self.byte_len as Address)
    }

    /// True if the two byte ranges intersect
    ///
    /// Zero-length records never overlap anything.
    pub fn overlaps(&self, other: &DependencyRecord) -> bool {
        if self.byte_len == 0 || other.byte_len == 0 {
            return false;
        }
        self.address < other.end_address() && other.address < self.end_address()
    }
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.producer {
            Some(p) => write!(f, "prod_thread={} prod_event={}", p.thread_id.0, p.event_id.0)?,
            None => write!(f, "prod_thread=none prod_event=none")?,
        }
        write!(f, " addr={:#x} bytes={}", self.address, self.byte_len)
    }
}
