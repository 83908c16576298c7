//! Statistics Registry
//!
//! One [`ThreadStats`] per simulated thread behind a `DashMap`, so replay
//! workers running on different OS threads can record without a global lock.
//! Each entry is still only mutated on behalf of its own simulated thread.

use super::aggregator::{ThreadStats, ThreadStatsSnapshot};
use crate::domain::event::{SubEvent, ThreadId, Ticks};
use dashmap::DashMap;

/// Process-lifetime map of per-thread aggregators
#[derive(Debug, Default)]
pub struct StatsRegistry {
    threads: DashMap<ThreadId, ThreadStats>,
}

impl StatsRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure an aggregator exists for `thread_id`
    pub fn register(&self, thread_id: ThreadId) {
        self.threads
            .entry(thread_id)
            .or_insert_with(|| ThreadStats::new(thread_id));
    }

    /// Number of registered threads
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// True if no thread has been registered
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Record a retired sub-event, registering the thread on first use
    pub fn record_sub_event(
        &self,
        thread_id: ThreadId,
        sub_event: &SubEvent,
        shared: bool,
        round_trip: Ticks,
    ) {
        self.threads
            .entry(thread_id)
            .or_insert_with(|| ThreadStats::new(thread_id))
            .record_sub_event(sub_event, shared, round_trip);
    }

    /// Counters of one thread
    pub fn snapshot(&self, thread_id: ThreadId) -> Option<ThreadStatsSnapshot> {
        self.threads.get(&thread_id).map(|entry| entry.snapshot())
    }

    /// Counters of every thread, ordered by thread id
    pub fn snapshot_all(&self) -> Vec<ThreadStatsSnapshot> {
        let mut all: Vec<_> = self.threads.iter().map(|entry| entry.snapshot()).collect();
        all.sort_by_key(|s| s.thread_id);
        all
    }

    /// Zero one thread's counters; returns false if it was never registered
    pub fn clear(&self, thread_id: ThreadId) -> bool {
        match self.threads.get_mut(&thread_id) {
            Some(mut entry) => {
                entry.clear();
                true
            }
            None => false,
        }
    }

    /// Zero every thread's counters, keeping registrations
    pub fn clear_all(&self) {
        self.threads.iter_mut().for_each(|mut entry| entry.clear());
    }
}
