//! Thread Statistics Aggregator

use crate::domain::event::{RequestKind, SubEvent, ThreadId, Ticks};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Immutable copy of a thread's counters, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadStatsSnapshot {
    /// Thread the counters belong to
    pub thread_id: ThreadId,
    /// Sub-events retired
    pub sub_events_retired: u64,
    /// Integer operations retired
    pub io_count_total: u64,
    /// Floating-point operations retired
    pub flop_count_total: u64,
    /// Reads of thread-private data
    pub local_reads: u64,
    /// Writes of thread-private data
    pub local_writes: u64,
    /// Reads of shared data
    pub shared_reads: u64,
    /// Writes of shared data
    pub shared_writes: u64,
    /// Summed memory round-trip time
    pub round_trip_time_total: Ticks,
}

impl ThreadStatsSnapshot {
    /// All-zero counters for `thread_id`
    pub const fn zeroed(thread_id: ThreadId) -> Self {
        Self {
            thread_id,
            sub_events_retired: 0,
            io_count_total: 0,
            flop_count_total: 0,
            local_reads: 0,
            local_writes: 0,
            shared_reads: 0,
            shared_writes: 0,
            round_trip_time_total: Ticks::ZERO,
        }
    }

    /// Total memory operations of every class
    pub const fn memory_ops(&self) -> u64 {
        self.local_reads
            .saturating_add(self.local_writes)
            .saturating_add(self.shared_reads)
            .saturating_add(self.shared_writes)
    }
}

/// Running totals for one simulated thread
///
/// Created once per thread and cleared between measurement windows.
#[derive(Debug, Clone)]
pub struct ThreadStats {
    counters: ThreadStatsSnapshot,
}

impl ThreadStats {
    /// Zeroed aggregator for `thread_id`
    pub const fn new(thread_id: ThreadId) -> Self {
        Self {
            counters: ThreadStatsSnapshot::zeroed(thread_id),
        }
    }

    /// Thread this aggregator belongs to
    #[inline]
    pub const fn thread_id(&self) -> ThreadId {
        self.counters.thread_id
    }

    /// Fold a retired sub-event into the totals
    ///
    /// `shared` says whether its memory access touched shared data; it is
    /// ignored for pure compute sub-events. Every total saturates.
    pub fn record_sub_event(&mut self, sub_event: &SubEvent, shared: bool, round_trip: Ticks) {
        let c = &mut self.counters;
        c.sub_events_retired = c.sub_events_retired.saturating_add(1);
        c.io_count_total = c.io_count_total.saturating_add(sub_event.io_count());
        c.flop_count_total = c.flop_count_total.saturating_add(sub_event.flop_count());

        let mem_ops = sub_event.mem_op_count();
        let slot = match (sub_event.request_kind(), shared) {
            (RequestKind::Read, false) => Some(&mut c.local_reads),
            (RequestKind::Read, true) => Some(&mut c.shared_reads),
            (RequestKind::Write, false) => Some(&mut c.local_writes),
            (RequestKind::Write, true) => Some(&mut c.shared_writes),
            (RequestKind::None, _) => None,
        };
        if let Some(total) = slot {
            *total = total.saturating_add(mem_ops);
        }

        c.round_trip_time_total = c.round_trip_time_total.saturating_add(round_trip);

        trace!(
            thread = %c.thread_id,
            request = %sub_event.request_kind(),
            shared,
            round_trip = round_trip.0,
            "recorded sub-event"
        );
    }

    /// Copy of the current counters
    #[inline]
    pub const fn snapshot(&self) -> ThreadStatsSnapshot {
        self.counters
    }

    /// Zero every counter in place, keeping the thread id
    pub fn clear(&mut self) {
        self.counters = ThreadStatsSnapshot::zeroed(self.counters.thread_id);
    }
}
