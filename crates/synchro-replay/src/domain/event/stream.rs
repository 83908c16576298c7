//! Per-thread Event Stream
//!
//! Holds the not-yet-retired events of one simulated thread in issue order.
//! Ingestion is validated the same way a tracer validates timestamps: an
//! event is only accepted if it belongs to this thread and its id is
//! strictly greater than the last accepted one.

use super::model::Event;
use super::types::{EventId, ThreadId};
use crate::domain::error::{ReplayError, ReplayResult};
use std::collections::VecDeque;
use tracing::debug;

/// Ordered queue of one thread's events
#[derive(Debug)]
pub struct ThreadEventStream {
    thread_id: ThreadId,
    events: VecDeque<Event>,
    last_event_id: Option<EventId>,
    retired: u64,
}

impl ThreadEventStream {
    /// Create an empty stream for `thread_id`
    pub fn new(thread_id: ThreadId) -> Self {
        Self {
            thread_id,
            events: VecDeque::new(),
            last_event_id: None,
            retired: 0,
        }
    }

    /// Owning thread
    #[inline]
    pub const fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Last accepted event id
    #[inline]
    pub const fn last_event_id(&self) -> Option<EventId> {
        self.last_event_id
    }

    /// Events retired so far
    #[inline]
    pub const fn retired(&self) -> u64 {
        self.retired
    }

    /// Events waiting in the stream
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no events are waiting
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append an event
    ///
    /// # Errors
    ///
    /// - `ThreadMismatch` if the event belongs to another thread
    /// - `NonMonotonicEventId` if its id does not exceed the last one
    pub fn push(&mut self, event: Event) -> ReplayResult<()> {
        if event.thread_id() != self.thread_id {
            return Err(ReplayError::ThreadMismatch {
                expected: self.thread_id,
                received: event.thread_id(),
                event_id: event.event_id(),
            });
        }

        if let Some(last) = self.last_event_id {
            if event.event_id() <= last {
                return Err(ReplayError::NonMonotonicEventId {
                    thread_id: self.thread_id,
                    last,
                    received: event.event_id(),
                });
            }
        }

        self.last_event_id = Some(event.event_id());
        self.events.push_back(event);
        Ok(())
    }

    /// Event at the head of the stream
    pub fn front(&self) -> Option<&Event> {
        self.events.front()
    }

    /// Mutable head, for decomposing and draining in place
    pub fn front_mut(&mut self) -> Option<&mut Event> {
        self.events.front_mut()
    }

    /// Remove the head if it is drained
    ///
    /// Returns `None` when the stream is empty or the head still has work.
    pub fn retire_front(&mut self) -> Option<Event> {
        if !self.events.front().is_some_and(Event::is_drained) {
            return None;
        }
        let event = self.events.pop_front()?;
        self.retired += 1;
        debug!(
            thread = %self.thread_id,
            event = %event.event_id(),
            retired = self.retired,
            "retired event"
        );
        Some(event)
    }

    /// Drop every waiting event
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::model::ComputeCounters;

    fn event(thread: u32, id: u64) -> Event {
        Event::computation(
            ThreadId::new(thread),
            EventId::new(id),
            ComputeCounters::new(1, 0, 0, 0),
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_accepts_increasing_ids() {
        let mut stream = ThreadEventStream::new(ThreadId::new(0));
        stream.push(event(0, 1)).unwrap();
        stream.push(event(0, 5)).unwrap();
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.last_event_id(), Some(EventId::new(5)));
    }

    #[test]
    fn test_rejects_non_monotonic_ids() {
        let mut stream = ThreadEventStream::new(ThreadId::new(0));
        stream.push(event(0, 3)).unwrap();

        let dup = stream.push(event(0, 3));
        assert!(matches!(dup, Err(ReplayError::NonMonotonicEventId { .. })));
        let older = stream.push(event(0, 2));
        assert!(matches!(older, Err(ReplayError::NonMonotonicEventId { .. })));
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_rejects_foreign_thread() {
        let mut stream = ThreadEventStream::new(ThreadId::new(0));
        let result = stream.push(event(1, 1));
        assert!(matches!(result, Err(ReplayError::ThreadMismatch { .. })));
        assert!(stream.is_empty());
    }

    #[test]
    fn test_retire_only_drained_head() {
        let mut stream = ThreadEventStream::new(ThreadId::new(0));
        stream.push(event(0, 1)).unwrap();
        stream.push(event(0, 2)).unwrap();

        // Not decomposed yet
        assert!(stream.retire_front().is_none());

        let head = stream.front_mut().unwrap();
        head.decompose().unwrap();
        assert!(stream.retire_front().is_none());

        stream.front_mut().unwrap().pop_sub_event().unwrap();
        let retired = stream.retire_front().unwrap();
        assert_eq!(retired.event_id(), EventId::new(1));
        assert_eq!(stream.retired(), 1);
        assert_eq!(stream.front().unwrap().event_id(), EventId::new(2));
    }
}
