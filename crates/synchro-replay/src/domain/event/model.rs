//! Replayed Events
//!
//! One [`Event`] is one entry in a simulated thread's trace. Its payload is
//! selected by kind, so a synchronization event simply has no compute
//! counters (rather than counters that happen to read zero).
//!
//! # Lifecycle
//!
//! ```text
//! built (queue empty, not materialized)
//!    │ decompose()
//!    ▼
//! materialized (queue closed to push-back)
//!    │ pop_sub_event() / requeue_sub_event() ...
//!    ▼
//! drained (queue empty, materialized) ──► retire() / drop
//! ```
//!
//! Dropping an event at any stage releases every dependency record and
//! every remaining sub-event it owns.

use super::dependency::DependencyRecord;
use super::queue::SubEventQueue;
use super::sub_event::{RequestKind, SubEvent};
use super::types::{Address, EventId, ThreadId};
use crate::domain::config::{QueueCapacity, ReplayConfig, DEFAULT_COMPUTE_GRANULE};
use crate::domain::error::{ReplayError, ReplayResult};
use std::fmt;
use tracing::{debug, trace, warn};

/// Event kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Local compute and memory work
    Computation,
    /// Consumption of values produced by other threads
    Communication,
    /// Call into a thread synchronization API
    SynchronizationApi,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Computation => "Computation",
            EventKind::Communication => "Communication",
            EventKind::SynchronizationApi => "SynchronizationAPI",
        };
        f.write_str(name)
    }
}

/// Synchronization primitive invoked by a `SynchronizationApi` event
///
/// Discriminants are the codes used in captured traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SyncPrimitive {
    /// `pthread_mutex_lock`
    MutexLock = 1,
    /// `pthread_mutex_unlock`
    MutexUnlock = 2,
    /// `pthread_create`
    ThreadCreate = 3,
    /// `pthread_join`
    ThreadJoin = 4,
    /// `pthread_barrier_wait`
    BarrierWait = 5,
    /// `pthread_cond_wait`
    CondWait = 6,
    /// `pthread_cond_signal`
    CondSignal = 7,
    /// `pthread_spin_lock`
    SpinLock = 8,
    /// `pthread_spin_unlock`
    SpinUnlock = 9,
    /// `sem_init`
    SemInit = 10,
    /// `sem_wait`
    SemWait = 11,
    /// `sem_post`
    SemPost = 12,
    /// `sem_getvalue`
    SemGetValue = 13,
    /// `sem_destroy`
    SemDestroy = 14,
}

impl SyncPrimitive {
    /// Every primitive, in code order
    pub const ALL: [SyncPrimitive; 14] = [
        SyncPrimitive::MutexLock,
        SyncPrimitive::MutexUnlock,
        SyncPrimitive::ThreadCreate,
        SyncPrimitive::ThreadJoin,
        SyncPrimitive::BarrierWait,
        SyncPrimitive::CondWait,
        SyncPrimitive::CondSignal,
        SyncPrimitive::SpinLock,
        SyncPrimitive::SpinUnlock,
        SyncPrimitive::SemInit,
        SyncPrimitive::SemWait,
        SyncPrimitive::SemPost,
        SyncPrimitive::SemGetValue,
        SyncPrimitive::SemDestroy,
    ];

    /// Trace code of this primitive
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Look up a primitive by trace code
    ///
    /// # Errors
    ///
    /// `UnknownSyncPrimitive` for codes outside 1..=14.
    pub fn from_code(code: u32) -> ReplayResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.code() == code)
            .ok_or(ReplayError::UnknownSyncPrimitive(code))
    }

    /// Short name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            SyncPrimitive::MutexLock => "mutex-lock",
            SyncPrimitive::MutexUnlock => "mutex-unlock",
            SyncPrimitive::ThreadCreate => "thread-create",
            SyncPrimitive::ThreadJoin => "thread-join",
            SyncPrimitive::BarrierWait => "barrier-wait",
            SyncPrimitive::CondWait => "cond-wait",
            SyncPrimitive::CondSignal => "cond-signal",
            SyncPrimitive::SpinLock => "spinlock-lock",
            SyncPrimitive::SpinUnlock => "spinlock-unlock",
            SyncPrimitive::SemInit => "sem-init",
            SyncPrimitive::SemWait => "sem-wait",
            SyncPrimitive::SemPost => "sem-post",
            SyncPrimitive::SemGetValue => "sem-getvalue",
            SyncPrimitive::SemDestroy => "sem-destroy",
        }
    }
}

impl TryFrom<u32> for SyncPrimitive {
    type Error = ReplayError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for SyncPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operation counts of a computation event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ComputeCounters {
    /// Integer operations
    pub iops: u64,
    /// Floating-point operations
    pub flops: u64,
    /// Memory reads
    pub mem_reads: u64,
    /// Memory writes
    pub mem_writes: u64,
}

impl ComputeCounters {
    /// Create a counter set
    pub const fn new(iops: u64, flops: u64, mem_reads: u64, mem_writes: u64) -> Self {
        Self {
            iops,
            flops,
            mem_reads,
            mem_writes,
        }
    }

    /// Sum of all four counters
    pub const fn total_ops(&self) -> u64 {
        self.iops
            .saturating_add(self.flops)
            .saturating_add(self.mem_reads)
            .saturating_add(self.mem_writes)
    }

    /// Number of sub-events a decomposition with `granule`-sized compute
    /// slices yields
    ///
    /// `None` for a zero granule or a count beyond `u64::MAX`.
    pub fn sub_event_count(&self, granule: u64) -> Option<u64> {
        if granule == 0 {
            return None;
        }
        self.mem_reads
            .checked_add(self.iops.div_ceil(granule))?
            .checked_add(self.flops.div_ceil(granule))?
            .checked_add(self.mem_writes)
    }
}

/// Kind-specific content of an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// Compute work plus the memory it touches
    Computation {
        /// Operation counts
        counters: ComputeCounters,
        /// Records read by this event
        read_set: Vec<DependencyRecord>,
        /// Records written by this event
        write_set: Vec<DependencyRecord>,
    },
    /// Values this event consumes from other threads
    Communication {
        /// Producer writes that must be visible first
        prerequisites: Vec<DependencyRecord>,
    },
    /// Synchronization API call
    SynchronizationApi {
        /// Which primitive
        primitive: SyncPrimitive,
        /// Lock, barrier, condition or semaphore identity, if recorded
        target: Option<Address>,
    },
}

impl EventPayload {
    /// Kind tag of this payload
    pub const fn kind(&self) -> EventKind {
        match self {
            EventPayload::Computation { .. } => EventKind::Computation,
            EventPayload::Communication { .. } => EventKind::Communication,
            EventPayload::SynchronizationApi { .. } => EventKind::SynchronizationApi,
        }
    }
}

/// One entry of a simulated thread's trace
#[derive(Debug)]
pub struct Event {
    event_id: EventId,
    thread_id: ThreadId,
    payload: EventPayload,
    sub_events: SubEventQueue,
    materialized: bool,
    compute_granule: u64,
}

impl Event {
    /// Build an event from its payload with the default configuration
    pub fn new(thread_id: ThreadId, event_id: EventId, payload: EventPayload) -> Self {
        Self {
            event_id,
            thread_id,
            payload,
            sub_events: SubEventQueue::new(QueueCapacity::Growable),
            materialized: false,
            compute_granule: DEFAULT_COMPUTE_GRANULE,
        }
    }

    /// Computation event
    pub fn computation(
        thread_id: ThreadId,
        event_id: EventId,
        counters: ComputeCounters,
        read_set: Vec<DependencyRecord>,
        write_set: Vec<DependencyRecord>,
    ) -> Self {
        Self::new(
            thread_id,
            event_id,
            EventPayload::Computation {
                counters,
                read_set,
                write_set,
            },
        )
    }

    /// Communication event
    pub fn communication(
        thread_id: ThreadId,
        event_id: EventId,
        prerequisites: Vec<DependencyRecord>,
    ) -> Self {
        Self::new(thread_id, event_id, EventPayload::Communication { prerequisites })
    }

    /// Synchronization API event
    pub fn synchronization(
        thread_id: ThreadId,
        event_id: EventId,
        primitive: SyncPrimitive,
        target: Option<Address>,
    ) -> Self {
        Self::new(
            thread_id,
            event_id,
            EventPayload::SynchronizationApi { primitive, target },
        )
    }

    /// Apply queue capacity and compute granule from `config`
    ///
    /// Only meaningful before decomposition. Values are taken as given; a
    /// zero granule makes [`decompose`](Self::decompose) of a computation
    /// event fail with `InvalidConfig`.
    #[must_use]
    pub fn with_config(mut self, config: &ReplayConfig) -> Self {
        if !self.materialized {
            self.sub_events = SubEventQueue::new(config.queue_capacity);
            self.compute_granule = config.compute_granule;
        }
        self
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Inspection
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Kind tag
    #[inline]
    pub const fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Event id within its thread
    #[inline]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Owning thread
    #[inline]
    pub const fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Kind-specific payload
    #[inline]
    pub const fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Compute counters, `None` unless this is a computation event
    pub const fn compute_counters(&self) -> Option<ComputeCounters> {
        match &self.payload {
            EventPayload::Computation { counters, .. } => Some(*counters),
            _ => None,
        }
    }

    /// Prerequisites of a communication event (empty for other kinds)
    pub fn communication_prerequisites(&self) -> &[DependencyRecord] {
        match &self.payload {
            EventPayload::Communication { prerequisites } => prerequisites,
            _ => &[],
        }
    }

    /// Read set of a computation event (empty for other kinds)
    pub fn computation_read_set(&self) -> &[DependencyRecord] {
        match &self.payload {
            EventPayload::Computation { read_set, .. } => read_set,
            _ => &[],
        }
    }

    /// Write set of a computation event (empty for other kinds)
    pub fn computation_write_set(&self) -> &[DependencyRecord] {
        match &self.payload {
            EventPayload::Computation { write_set, .. } => write_set,
            _ => &[],
        }
    }

    /// Primitive of a synchronization event
    pub const fn sync_primitive(&self) -> Option<SyncPrimitive> {
        match &self.payload {
            EventPayload::SynchronizationApi { primitive, .. } => Some(*primitive),
            _ => None,
        }
    }

    /// Target address of a synchronization event, if recorded
    pub const fn sync_target_address(&self) -> Option<Address> {
        match &self.payload {
            EventPayload::SynchronizationApi { target, .. } => *target,
            _ => None,
        }
    }

    /// True once `decompose` has populated the queue
    #[inline]
    pub const fn sub_events_materialized(&self) -> bool {
        self.materialized
    }

    /// Sub-events still queued
    #[inline]
    pub fn pending_sub_events(&self) -> usize {
        self.sub_events.len()
    }

    /// Queued sub-events in issue order
    pub fn sub_events(&self) -> impl Iterator<Item = &SubEvent> {
        self.sub_events.iter()
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Decomposition and draining
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Populate the sub-event queue from the payload
    ///
    /// Returns the number of sub-events created; a repeated call is a no-op
    /// returning 0. Computation events yield reads, then IOPS slices, then
    /// FLOPS slices, then writes. Communication events yield one message
    /// read per prerequisite.
    ///
    /// # Errors
    ///
    /// - `NoDecompositionPolicy` for synchronization events
    /// - `InvalidConfig` for a computation event configured with a zero granule
    /// - `QueueOverflow` if a fixed capacity is too small
    /// - `QueueAllocation` if a growable queue cannot hold the batch
    ///
    /// The sub-event count is checked before anything is built, so on error
    /// the event stays unmaterialized and its queue untouched.
    pub fn decompose(&mut self) -> ReplayResult<usize> {
        if self.materialized {
            return Ok(0);
        }

        let count = match &self.payload {
            EventPayload::Computation { counters, .. } => {
                if self.compute_granule == 0 {
                    return Err(ReplayError::InvalidConfig(
                        "compute_granule must be at least 1".into(),
                    ));
                }
                counters
                    .sub_event_count(self.compute_granule)
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(usize::MAX)
            }
            EventPayload::Communication { prerequisites } => prerequisites.len(),
            EventPayload::SynchronizationApi { .. } => {
                return Err(ReplayError::NoDecompositionPolicy {
                    kind: self.kind(),
                    event_id: self.event_id,
                    thread_id: self.thread_id,
                });
            }
        };

        self.sub_events.reserve_back(count)?;
        match &self.payload {
            EventPayload::Computation {
                counters,
                read_set,
                write_set,
            } => self.sub_events.extend_reserved(computation_sub_events(
                *counters,
                read_set,
                write_set,
                self.compute_granule,
            )),
            EventPayload::Communication { prerequisites } => self
                .sub_events
                .extend_reserved(prerequisites.iter().cloned().map(SubEvent::message)),
            // rejected above
            EventPayload::SynchronizationApi { .. } => {}
        }
        self.sub_events.close();
        self.materialized = true;

        debug!(
            thread = %self.thread_id,
            event = %self.event_id,
            kind = %self.kind(),
            sub_events = count,
            "decomposed event"
        );
        Ok(count)
    }

    /// Head sub-event without removing it
    #[inline]
    pub fn next_sub_event(&self) -> Option<&SubEvent> {
        self.sub_events.front()
    }

    /// Mutable head sub-event, for stamping trigger times
    #[inline]
    pub fn next_sub_event_mut(&mut self) -> Option<&mut SubEvent> {
        self.sub_events.front_mut()
    }

    /// Remove and return the head sub-event
    ///
    /// # Errors
    ///
    /// `EmptyQueue` if nothing is queued.
    pub fn pop_sub_event(&mut self) -> ReplayResult<SubEvent> {
        let sub_event = self.sub_events.pop_front().ok_or(ReplayError::EmptyQueue {
            event_id: self.event_id,
        })?;
        trace!(
            thread = %self.thread_id,
            event = %self.event_id,
            remaining = self.sub_events.len(),
            "popped sub-event"
        );
        Ok(sub_event)
    }

    /// Put a popped sub-event back at the head
    ///
    /// Used when the engine pops a sub-event and then finds its dependency
    /// still unsatisfied.
    ///
    /// # Errors
    ///
    /// - `NotMaterialized` before `decompose`
    /// - `QueueOverflow` if a fixed capacity is already reached
    pub fn requeue_sub_event(&mut self, sub_event: SubEvent) -> ReplayResult<()> {
        if !self.materialized {
            return Err(ReplayError::NotMaterialized {
                event_id: self.event_id,
            });
        }
        self.sub_events.push_front(sub_event)?;
        trace!(
            thread = %self.thread_id,
            event = %self.event_id,
            "requeued sub-event"
        );
        Ok(())
    }

    /// True iff materialized and nothing is left to pop
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.materialized && self.sub_events.is_empty()
    }

    /// Consume the event, returning how many sub-events were abandoned
    pub fn retire(self) -> usize {
        let abandoned = self.sub_events.len();
        if abandoned > 0 {
            warn!(
                thread = %self.thread_id,
                event = %self.event_id,
                abandoned,
                "retiring event with unfired sub-events"
            );
        }
        abandoned
    }
}

/// Split `total` operations into slices of at most `granule` (non-zero)
fn granules(total: u64, granule: u64) -> impl Iterator<Item = u64> {
    let full = total / granule;
    let rest = total % granule;
    (0..full)
        .map(move |_| granule)
        .chain((rest > 0).then_some(rest))
}

fn record_at(set: &[DependencyRecord], i: u64) -> Option<DependencyRecord> {
    usize::try_from(i).ok().and_then(|i| set.get(i)).cloned()
}

fn computation_sub_events<'a>(
    counters: ComputeCounters,
    read_set: &'a [DependencyRecord],
    write_set: &'a [DependencyRecord],
    granule: u64,
) -> impl Iterator<Item = SubEvent> + 'a {
    let reads = (0..counters.mem_reads)
        .map(move |i| SubEvent::memory(RequestKind::Read, record_at(read_set, i)));
    let iops = granules(counters.iops, granule).map(|n| SubEvent::compute(n, 0));
    let flops = granules(counters.flops, granule).map(|n| SubEvent::compute(0, n));
    let writes = (0..counters.mem_writes)
        .map(move |i| SubEvent::memory(RequestKind::Write, record_at(write_set, i)));

    reads.chain(iops).chain(flops).chain(writes)
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kind={} event_id={} thread_id={}",
            self.kind(),
            self.event_id.0,
            self.thread_id.0
        )?;
        if let Some(c) = self.compute_counters() {
            write!(
                f,
                " iops={} flops={} mem_reads={} mem_writes={}",
                c.iops, c.flops, c.mem_reads, c.mem_writes
            )?;
        }
        write!(f, " sub_events_materialized={}", self.materialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCategory;

    fn compute_event(counters: ComputeCounters) -> Event {
        Event::computation(ThreadId::new(0), EventId::new(1), counters, vec![], vec![])
    }

    #[test]
    fn test_new_event_is_not_materialized() {
        let event = compute_event(ComputeCounters::new(1, 1, 1, 1));
        assert!(!event.sub_events_materialized());
        assert!(!event.is_drained());
        assert!(event.next_sub_event().is_none());
        assert_eq!(event.pending_sub_events(), 0);
    }

    #[test]
    fn test_computation_count_is_sum_of_counters() {
        let counters = ComputeCounters::new(3, 2, 4, 1);
        let mut event = compute_event(counters);

        let created = event.decompose().unwrap();
        assert_eq!(created as u64, counters.total_ops());
        assert_eq!(event.pending_sub_events(), 10);
    }

    #[test]
    fn test_computation_order_and_messages() {
        let read = DependencyRecord::local(0x100, 4);
        let write = DependencyRecord::local(0x200, 8);
        let mut event = Event::computation(
            ThreadId::new(0),
            EventId::new(1),
            ComputeCounters::new(1, 1, 2, 1),
            vec![read.clone()],
            vec![write.clone()],
        );
        event.decompose().unwrap();

        let kinds: Vec<_> = event.sub_events().map(SubEvent::request_kind).collect();
        assert_eq!(
            kinds,
            vec![
                RequestKind::Read,
                RequestKind::Read,
                RequestKind::None,
                RequestKind::None,
                RequestKind::Write,
            ]
        );

        let subs: Vec<_> = event.sub_events().cloned().collect();
        assert_eq!(subs[0].dependency(), Some(&read));
        // Second read has no matching record
        assert!(!subs[1].carries_message());
        assert_eq!(subs[2].io_count(), 1);
        assert_eq!(subs[3].flop_count(), 1);
        assert_eq!(subs[4].dependency(), Some(&write));
    }

    #[test]
    fn test_granule_batches_compute() {
        let config = ReplayConfig {
            compute_granule: 4,
            ..Default::default()
        };
        let mut event = compute_event(ComputeCounters::new(10, 4, 0, 0)).with_config(&config);

        assert_eq!(event.decompose().unwrap(), 4);
        let iops: Vec<_> = event.sub_events().map(SubEvent::io_count).collect();
        assert_eq!(iops, vec![4, 4, 2, 0]);
        let flops: u64 = event.sub_events().map(SubEvent::flop_count).sum();
        assert_eq!(flops, 4);
    }

    #[test]
    fn test_decompose_is_idempotent() {
        let mut event = compute_event(ComputeCounters::new(2, 0, 1, 0));
        assert_eq!(event.decompose().unwrap(), 3);
        let before: Vec<_> = event.sub_events().cloned().collect();

        assert_eq!(event.decompose().unwrap(), 0);
        let after: Vec<_> = event.sub_events().cloned().collect();
        assert_eq!(before, after);
        assert!(event.sub_events_materialized());
    }

    #[test]
    fn test_sync_event_cannot_decompose() {
        let mut event = Event::synchronization(
            ThreadId::new(1),
            EventId::new(9),
            SyncPrimitive::MutexLock,
            Some(0xdead),
        );
        let err = event.decompose().unwrap_err();
        assert!(matches!(err, ReplayError::NoDecompositionPolicy { .. }));
        assert!(!event.sub_events_materialized());
    }

    #[test]
    fn test_overflow_leaves_event_unmaterialized() {
        let config = ReplayConfig {
            queue_capacity: QueueCapacity::Fixed(2),
            ..Default::default()
        };
        let mut event = compute_event(ComputeCounters::new(3, 0, 0, 0)).with_config(&config);

        assert!(matches!(
            event.decompose(),
            Err(ReplayError::QueueOverflow { capacity: 2, requested: 3 })
        ));
        assert!(!event.sub_events_materialized());
        assert_eq!(event.pending_sub_events(), 0);
    }

    #[test]
    fn test_huge_counters_overflow_fixed_capacity_before_building() {
        let config = ReplayConfig {
            queue_capacity: QueueCapacity::Fixed(4),
            ..Default::default()
        };
        let mut event =
            compute_event(ComputeCounters::new(u64::MAX, 0, 0, 0)).with_config(&config);

        let err = event.decompose().unwrap_err();
        assert!(matches!(err, ReplayError::QueueOverflow { capacity: 4, .. }));
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!event.sub_events_materialized());
        assert_eq!(event.pending_sub_events(), 0);
    }

    #[test]
    fn test_unrepresentable_count_fails_on_growable_queue() {
        let mut event = compute_event(ComputeCounters::new(u64::MAX, u64::MAX, 0, 0));

        let err = event.decompose().unwrap_err();
        assert_eq!(err, ReplayError::QueueAllocation { requested: usize::MAX });
        assert!(!event.sub_events_materialized());
    }

    #[test]
    fn test_sub_event_count() {
        let counters = ComputeCounters::new(10, 4, 2, 1);
        assert_eq!(counters.sub_event_count(1), Some(17));
        assert_eq!(counters.sub_event_count(4), Some(7));
        assert_eq!(counters.sub_event_count(0), None);
        assert_eq!(ComputeCounters::new(u64::MAX, 0, 1, 0).sub_event_count(1), None);
    }

    #[test]
    fn test_zero_granule_is_rejected() {
        let config = ReplayConfig {
            compute_granule: 0,
            ..Default::default()
        };
        let mut event = compute_event(ComputeCounters::new(3, 0, 0, 0)).with_config(&config);

        let err = event.decompose().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!event.sub_events_materialized());
    }

    #[test]
    fn test_pop_until_drained() {
        let mut event = compute_event(ComputeCounters::new(2, 0, 0, 0));
        event.decompose().unwrap();

        event.pop_sub_event().unwrap();
        assert!(!event.is_drained());
        event.pop_sub_event().unwrap();
        assert!(event.is_drained());

        assert_eq!(
            event.pop_sub_event(),
            Err(ReplayError::EmptyQueue { event_id: EventId::new(1) })
        );
    }

    #[test]
    fn test_requeue_restores_head() {
        let mut event = compute_event(ComputeCounters::new(1, 1, 0, 0));
        assert!(matches!(
            event.requeue_sub_event(SubEvent::compute(1, 0)),
            Err(ReplayError::NotMaterialized { .. })
        ));

        event.decompose().unwrap();
        let head = event.pop_sub_event().unwrap();
        event.requeue_sub_event(head.clone()).unwrap();
        assert_eq!(event.next_sub_event(), Some(&head));
        assert_eq!(event.pending_sub_events(), 2);
    }

    #[test]
    fn test_retire_reports_abandoned() {
        let mut event = compute_event(ComputeCounters::new(3, 0, 0, 0));
        event.decompose().unwrap();
        event.pop_sub_event().unwrap();
        assert_eq!(event.retire(), 2);
    }

    #[test]
    fn test_sync_primitive_codes_round_trip() {
        for primitive in SyncPrimitive::ALL {
            assert_eq!(SyncPrimitive::from_code(primitive.code()), Ok(primitive));
        }
        assert_eq!(SyncPrimitive::BarrierWait.code(), 5);
        assert_eq!(SyncPrimitive::try_from(0u32), Err(ReplayError::UnknownSyncPrimitive(0)));
        assert_eq!(SyncPrimitive::try_from(15u32), Err(ReplayError::UnknownSyncPrimitive(15)));
    }

    #[test]
    fn test_display() {
        let event = compute_event(ComputeCounters::new(1, 2, 3, 4));
        assert_eq!(
            event.to_string(),
            "kind=Computation event_id=1 thread_id=0 iops=1 flops=2 mem_reads=3 mem_writes=4 \
             sub_events_materialized=false"
        );

        let sync = Event::synchronization(
            ThreadId::new(2),
            EventId::new(5),
            SyncPrimitive::BarrierWait,
            None,
        );
        assert_eq!(
            sync.to_string(),
            "kind=SynchronizationAPI event_id=5 thread_id=2 sub_events_materialized=false"
        );
    }
}
