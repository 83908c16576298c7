//! Sub-Event Queue
//!
//! FIFO of an event's decomposed work. Backed by a `VecDeque` so that the
//! engine can pop the head, find its dependency unsatisfied, and put it back
//! at the front in O(1).
//!
//! Once closed (after materialization) the tail is sealed: only front
//! re-insertion of previously popped entries remains possible.

use super::sub_event::SubEvent;
use crate::domain::config::QueueCapacity;
use crate::domain::error::{ReplayError, ReplayResult};
use std::collections::VecDeque;

/// Bounded or growable deque of sub-events
#[derive(Debug, Clone, Default)]
pub struct SubEventQueue {
    entries: VecDeque<SubEvent>,
    capacity: QueueCapacity,
    closed: bool,
}

impl SubEventQueue {
    /// Create an empty, open queue
    ///
    /// Nothing is allocated until the first push.
    pub const fn new(capacity: QueueCapacity) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            closed: false,
        }
    }

    /// Capacity policy
    #[inline]
    pub const fn capacity(&self) -> QueueCapacity {
        self.capacity
    }

    /// Number of queued sub-events
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no sub-events are queued
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if a fixed capacity has been reached
    #[inline]
    pub fn is_full(&self) -> bool {
        self.capacity
            .limit()
            .is_some_and(|limit| self.entries.len() >= limit)
    }

    /// True once the tail has been sealed
    #[inline]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Seal the tail
    pub fn close(&mut self) {
        self.closed = true;
    }

    fn ensure_room(&self, additional: usize) -> ReplayResult<()> {
        if let Some(limit) = self.capacity.limit() {
            let requested = self.entries.len().saturating_add(additional);
            if requested > limit {
                return Err(ReplayError::QueueOverflow {
                    capacity: limit,
                    requested,
                });
            }
        }
        Ok(())
    }

    /// Append at the tail
    ///
    /// # Errors
    ///
    /// - `QueueClosed` after [`close`](Self::close)
    /// - `QueueOverflow` if a fixed capacity would be exceeded
    pub fn push_back(&mut self, sub_event: SubEvent) -> ReplayResult<()> {
        if self.closed {
            return Err(ReplayError::QueueClosed);
        }
        self.ensure_room(1)?;
        self.entries.push_back(sub_event);
        Ok(())
    }

    /// Append a whole batch at the tail, all or nothing
    ///
    /// # Errors
    ///
    /// Same as [`push_back`](Self::push_back); on error the queue is unchanged.
    pub fn extend_back(&mut self, batch: Vec<SubEvent>) -> ReplayResult<()> {
        self.reserve_back(batch.len())?;
        self.entries.extend(batch);
        Ok(())
    }

    /// Make room for `additional` tail entries without queueing anything
    ///
    /// # Errors
    ///
    /// - `QueueClosed` after [`close`](Self::close)
    /// - `QueueOverflow` if a fixed capacity would be exceeded
    /// - `QueueAllocation` if a growable queue cannot allocate the room
    pub fn reserve_back(&mut self, additional: usize) -> ReplayResult<()> {
        if self.closed {
            return Err(ReplayError::QueueClosed);
        }
        self.ensure_room(additional)?;
        let requested = self.entries.len().saturating_add(additional);
        self.entries
            .try_reserve(additional)
            .map_err(|_| ReplayError::QueueAllocation { requested })
    }

    /// Append entries whose room was secured by [`reserve_back`](Self::reserve_back)
    pub(crate) fn extend_reserved(&mut self, batch: impl Iterator<Item = SubEvent>) {
        debug_assert!(!self.closed);
        self.entries.extend(batch);
    }

    /// Re-insert at the head (allowed on a closed queue)
    ///
    /// # Errors
    ///
    /// `QueueOverflow` if a fixed capacity would be exceeded.
    pub fn push_front(&mut self, sub_event: SubEvent) -> ReplayResult<()> {
        self.ensure_room(1)?;
        self.entries.push_front(sub_event);
        Ok(())
    }

    /// Remove the head
    pub fn pop_front(&mut self) -> Option<SubEvent> {
        self.entries.pop_front()
    }

    /// Head without removing it
    pub fn front(&self) -> Option<&SubEvent> {
        self.entries.front()
    }

    /// Mutable head, for stamping trigger times in place
    pub fn front_mut(&mut self) -> Option<&mut SubEvent> {
        self.entries.front_mut()
    }

    /// Iterate in issue order
    pub fn iter(&self) -> impl Iterator<Item = &SubEvent> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = SubEventQueue::new(QueueCapacity::Growable);
        assert!(queue.is_empty());

        queue.push_back(SubEvent::compute(1, 0)).unwrap();
        queue.push_back(SubEvent::compute(2, 0)).unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.front().unwrap().io_count(), 1);

        assert_eq!(queue.pop_front().unwrap().io_count(), 1);
        assert_eq!(queue.pop_front().unwrap().io_count(), 2);
        assert!(queue.pop_front().is_none());
    }

    #[test]
    fn test_fixed_capacity_overflow() {
        let mut queue = SubEventQueue::new(QueueCapacity::Fixed(2));
        queue.push_back(SubEvent::compute(1, 0)).unwrap();
        queue.push_back(SubEvent::compute(1, 0)).unwrap();
        assert!(queue.is_full());

        assert_eq!(
            queue.push_back(SubEvent::compute(1, 0)),
            Err(ReplayError::QueueOverflow {
                capacity: 2,
                requested: 3
            })
        );
        assert!(queue.push_front(SubEvent::compute(1, 0)).is_err());
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut queue = SubEventQueue::new(QueueCapacity::Fixed(3));
        queue.push_back(SubEvent::compute(1, 0)).unwrap();

        let batch = vec![SubEvent::compute(2, 0); 3];
        assert!(queue.extend_back(batch).is_err());
        assert_eq!(queue.len(), 1);

        queue.extend_back(vec![SubEvent::compute(2, 0); 2]).unwrap();
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_reserve_rejects_oversized_batch_without_allocating() {
        let mut fixed = SubEventQueue::new(QueueCapacity::Fixed(4));
        assert_eq!(
            fixed.reserve_back(usize::MAX),
            Err(ReplayError::QueueOverflow {
                capacity: 4,
                requested: usize::MAX
            })
        );
        assert!(fixed.is_empty());

        let mut growable = SubEventQueue::new(QueueCapacity::Growable);
        growable.push_back(SubEvent::compute(1, 0)).unwrap();
        assert_eq!(
            growable.reserve_back(usize::MAX),
            Err(ReplayError::QueueAllocation {
                requested: usize::MAX
            })
        );
        assert_eq!(growable.len(), 1);
    }

    #[test]
    fn test_closed_queue_allows_requeue_only() {
        let mut queue = SubEventQueue::new(QueueCapacity::Growable);
        queue.push_back(SubEvent::compute(1, 0)).unwrap();
        queue.push_back(SubEvent::compute(2, 0)).unwrap();
        queue.close();

        assert_eq!(
            queue.push_back(SubEvent::compute(3, 0)),
            Err(ReplayError::QueueClosed)
        );

        let head = queue.pop_front().unwrap();
        queue.push_front(head).unwrap();
        assert_eq!(queue.front().unwrap().io_count(), 1);
        assert_eq!(queue.len(), 2);
    }
}
