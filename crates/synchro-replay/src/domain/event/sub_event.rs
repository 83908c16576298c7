//! Sub-Events - the smallest unit of replayed work
//!
//! An event is decomposed into an ordered run of sub-events. Each one holds a
//! slice of the event's IOPS/FLOPS/memory operations and may carry a single
//! dependency record ("message"). A sub-event whose message names a remote
//! producer may not complete until the engine has seen that producer retire.

use super::dependency::DependencyRecord;
use super::types::Ticks;
use std::fmt;

/// Memory request issued by a sub-event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Pure compute, no memory request
    #[default]
    None,
    /// Load
    Read,
    /// Store
    Write,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestKind::None => "none",
            RequestKind::Read => "read",
            RequestKind::Write => "write",
        };
        f.write_str(name)
    }
}

/// One atomic unit of an event's work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubEvent {
    io_count: u64,
    flop_count: u64,
    mem_op_count: u64,
    request_kind: RequestKind,
    message: Option<DependencyRecord>,
    fired: bool,
    trigger_time: Option<Ticks>,
    first_trigger_time: Option<Ticks>,
}

impl SubEvent {
    /// Compute-only sub-event
    pub const fn compute(io_count: u64, flop_count: u64) -> Self {
        Self {
            io_count,
            flop_count,
            mem_op_count: 0,
            request_kind: RequestKind::None,
            message: None,
            fired: false,
            trigger_time: None,
            first_trigger_time: None,
        }
    }

    /// Single memory request, optionally tied to a dependency record
    pub const fn memory(request_kind: RequestKind, message: Option<DependencyRecord>) -> Self {
        Self {
            io_count: 0,
            flop_count: 0,
            mem_op_count: 1,
            request_kind,
            message,
            fired: false,
            trigger_time: None,
            first_trigger_time: None,
        }
    }

    /// Consumer-side read of a communicated value
    pub const fn message(record: DependencyRecord) -> Self {
        Self::memory(RequestKind::Read, Some(record))
    }

    /// Integer operations in this slice
    #[inline]
    pub const fn io_count(&self) -> u64 {
        self.io_count
    }

    /// Floating-point operations in this slice
    #[inline]
    pub const fn flop_count(&self) -> u64 {
        self.flop_count
    }

    /// Memory operations in this slice
    #[inline]
    pub const fn mem_op_count(&self) -> u64 {
        self.mem_op_count
    }

    /// Memory request kind
    #[inline]
    pub const fn request_kind(&self) -> RequestKind {
        self.request_kind
    }

    /// True iff a dependency record is attached
    #[inline]
    pub const fn carries_message(&self) -> bool {
        self.message.is_some()
    }

    /// Attached dependency record
    #[inline]
    pub const fn dependency(&self) -> Option<&DependencyRecord> {
        self.message.as_ref()
    }

    /// True if completion waits on a remote producer
    #[inline]
    pub fn is_gated(&self) -> bool {
        self.message.as_ref().is_some_and(DependencyRecord::is_remote)
    }

    /// True once the engine has fired this sub-event
    #[inline]
    pub const fn has_fired(&self) -> bool {
        self.fired
    }

    /// Most recent trigger check time
    #[inline]
    pub const fn trigger_time(&self) -> Option<Ticks> {
        self.trigger_time
    }

    /// Time of the first trigger check
    #[inline]
    pub const fn first_trigger_time(&self) -> Option<Ticks> {
        self.first_trigger_time
    }

    /// Record a trigger check at `at`
    ///
    /// The first call also pins `first_trigger_time`; later calls only move
    /// `trigger_time`.
    pub fn mark_triggered(&mut self, at: Ticks) {
        self.trigger_time = Some(at);
        self.first_trigger_time.get_or_insert(at);
    }

    /// Mark as fired at `at`
    pub fn fire(&mut self, at: Ticks) {
        self.mark_triggered(at);
        self.fired = true;
    }

    /// Ticks spent between the first and the latest trigger check
    pub fn wait_time(&self) -> Option<Ticks> {
        match (self.first_trigger_time, self.trigger_time) {
            (Some(first), Some(last)) => Some(last.saturating_sub(first)),
            _ => None,
        }
    }
}

impl fmt::Display for SubEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iops={} flops={} mem_ops={} req={} fired={}",
            self.io_count, self.flop_count, self.mem_op_count, self.request_kind, self.fired
        )?;
        if let Some(msg) = &self.message {
            write!(f, " msg=[{}]", msg)?;
        }
        Ok(())
    }
}
