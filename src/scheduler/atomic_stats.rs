/*!
 * Lock-Free Scheduler Statistics
 * Atomic counters so a monitoring thread can read while the engine thread dispatches
 */

use crate::core::serde::is_zero_u64;
use crate::process::Cadence;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Snapshot of scheduler counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedulerStats {
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub processes_created: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub processes_swept: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub frame_passes: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub tick_passes: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub frame_updates: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub tick_updates: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub kill_after_expirations: u64,
    pub live_processes: usize,
}

/// Atomic scheduler statistics
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - All operations use relaxed ordering; snapshots are advisory
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct AtomicSchedulerStats {
    processes_created: AtomicU64,
    processes_swept: AtomicU64,
    frame_passes: AtomicU64,
    tick_passes: AtomicU64,
    frame_updates: AtomicU64,
    tick_updates: AtomicU64,
    kill_after_expirations: AtomicU64,
    live_processes: AtomicUsize,
}

impl AtomicSchedulerStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn inc_created(&self) {
        self.processes_created.fetch_add(1, Ordering::Relaxed);
        self.live_processes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn add_swept(&self, count: usize) {
        if count == 0 {
            return;
        }
        self.processes_swept.fetch_add(count as u64, Ordering::Relaxed);
        self.live_processes.fetch_sub(count, Ordering::Relaxed);
    }

    /// Count one dispatch pass. Schedulers sharing this block all add to it.
    #[inline]
    pub fn inc_pass(&self, cadence: Cadence) {
        let counter = match cadence {
            Cadence::PerFrame => &self.frame_passes,
            Cadence::PerTick => &self.tick_passes,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn add_updates(&self, cadence: Cadence, count: usize) {
        let counter = match cadence {
            Cadence::PerFrame => &self.frame_updates,
            Cadence::PerTick => &self.tick_updates,
        };
        counter.fetch_add(count as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn add_expirations(&self, count: usize) {
        self.kill_after_expirations
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics
    pub fn snapshot(&self) -> SchedulerStats {
        SchedulerStats {
            processes_created: self.processes_created.load(Ordering::Relaxed),
            processes_swept: self.processes_swept.load(Ordering::Relaxed),
            frame_passes: self.frame_passes.load(Ordering::Relaxed),
            tick_passes: self.tick_passes.load(Ordering::Relaxed),
            frame_updates: self.frame_updates.load(Ordering::Relaxed),
            tick_updates: self.tick_updates.load(Ordering::Relaxed),
            kill_after_expirations: self.kill_after_expirations.load(Ordering::Relaxed),
            live_processes: self.live_processes.load(Ordering::Relaxed),
        }
    }
}
