//! Identifier and time types shared by the event model
//!
//! Thread ids, event ids and ticks are newtypes so that a producer thread
//! can never be confused with a producer event, and neither needs a
//! reserved magic value to mean "absent" (use `Option` instead).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte address in the simulated address space
pub type Address = u64;

/// Identifier of a simulated thread
///
/// # Example
///
/// ```rust
/// use synchro_replay::domain::event::ThreadId;
///
/// let t0 = ThreadId::new(0);
/// assert_eq!(t0.as_u32(), 0);
/// assert_eq!(t0.to_string(), "t0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(pub u32);

impl ThreadId {
    /// Create a new thread identifier
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw numeric id
    #[inline(always)]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Identifier of an event within one thread's stream
///
/// Unique per thread and strictly increasing in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    /// Create a new event identifier
    #[inline(always)]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric id
    #[inline(always)]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Simulated time in engine ticks
///
/// The core never advances time itself; ticks are stamped onto sub-events
/// and statistics by the replay engine.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Ticks(pub u64);

impl Ticks {
    /// Zero ticks
    pub const ZERO: Self = Ticks(0);

    /// Add two durations, clamping at `u64::MAX`
    #[inline(always)]
    pub const fn saturating_add(self, other: Ticks) -> Ticks {
        Ticks(self.0.saturating_add(other.0))
    }

    /// Subtract, clamping at zero
    #[inline(always)]
    pub const fn saturating_sub(self, other: Ticks) -> Ticks {
        Ticks(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
