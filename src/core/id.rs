/*!
 * Process Identity
 * Opaque PID handles and the allocator that hands them out
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process ID
///
/// Opaque handle for a process. PIDs are never recycled: once a process is
/// swept its PID resolves to "not found" forever, so stale parent, child and
/// wait-target references stay safe to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(NonZeroU64);

impl Pid {
    /// Build a PID from its raw value. Zero is not a valid PID.
    #[inline]
    #[must_use]
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    #[inline(always)]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic PID allocator
///
/// # Performance
/// - Cache-line aligned to prevent false sharing with the stats block
/// - Lock-free atomic counter
#[repr(C, align(64))]
#[derive(Debug)]
pub struct PidAllocator {
    counter: AtomicU64,
}

impl PidAllocator {
    /// Create allocator whose first PID is 1
    #[inline]
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Hand out the next unused PID
    #[inline]
    pub fn next(&self) -> Pid {
        let issued = self.counter.fetch_add(1, Ordering::Relaxed);
        Pid(NonZeroU64::MIN.saturating_add(issued))
    }

    /// Peek at the raw value the next call to [`next`](Self::next) will return
    #[inline]
    pub fn peek(&self) -> u64 {
        self.counter.load(Ordering::Relaxed) + 1
    }
}

impl Default for PidAllocator {
    fn default() -> Self {
        Self::new()
    }
}
