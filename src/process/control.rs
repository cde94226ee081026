/*!
 * Process Control Block
 *
 * Scheduler-owned bookkeeping for one process: state, flags and the weak
 * (PID-only) relations to its parent and wait target. Every state change a
 * process can request, on itself or on another PID, lands here.
 */

use super::types::{Cadence, PeriodicSleep, ProcessFlags, ProcessInfo, ProcessMeta, ProcessState};
use crate::core::Pid;

#[derive(Debug, Clone)]
pub struct ControlBlock {
    pid: Pid,
    meta: ProcessMeta,
    cadence: Cadence,
    state: ProcessState,
    parent: Option<Pid>,
    wait_target: Option<Pid>,
    pause_remaining: u32,
    flags: ProcessFlags,
    runs: u64,
}

impl ControlBlock {
    pub(crate) fn new(pid: Pid, parent: Option<Pid>, meta: ProcessMeta, cadence: Cadence) -> Self {
        Self {
            pid,
            meta,
            cadence,
            state: ProcessState::Uninitialized,
            parent,
            wait_target: None,
            pause_remaining: 0,
            flags: ProcessFlags::default(),
            runs: 0,
        }
    }

    #[inline(always)]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline(always)]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    #[inline(always)]
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    #[inline]
    pub fn parent(&self) -> Option<Pid> {
        self.parent
    }

    #[inline]
    pub fn wait_target(&self) -> Option<Pid> {
        self.wait_target
    }

    #[inline]
    pub fn pause_remaining(&self) -> u32 {
        self.pause_remaining
    }

    #[inline]
    pub fn flags(&self) -> &ProcessFlags {
        &self.flags
    }

    #[inline]
    pub fn meta(&self) -> &ProcessMeta {
        &self.meta
    }

    #[inline]
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Pause for `slices` time slices of this process's own cadence.
    /// Dead processes stay dead.
    pub fn pause(&mut self, slices: u32) -> bool {
        if self.state.is_dead() {
            return false;
        }
        self.state = ProcessState::Paused;
        self.pause_remaining = slices;
        self.wait_target = None;
        true
    }

    /// Block until `target` is dead or no longer registered
    pub fn wait_for(&mut self, target: Pid) -> bool {
        if self.state.is_dead() {
            return false;
        }
        if target == self.pid {
            log::warn!("PID {} tried to wait on itself; ignoring", self.pid);
            return false;
        }
        self.state = ProcessState::Waiting;
        self.wait_target = Some(target);
        self.pause_remaining = 0;
        true
    }

    /// Mark dead. Storage is reclaimed by the next sweep.
    pub fn kill(&mut self) -> bool {
        if self.state.is_dead() {
            return false;
        }
        self.state = ProcessState::Dead;
        self.wait_target = None;
        true
    }

    /// Attach or replace the kill-after countdown. Zero kills immediately.
    pub fn kill_after(&mut self, runs: u32) {
        if runs == 0 {
            self.kill();
        } else {
            self.flags.kill_after = Some(runs);
        }
    }

    /// Run only every `period`-th eligible slice. Periods of 0 or 1 clear the flag.
    pub fn set_periodic_sleep(&mut self, period: u32) {
        self.flags.periodic_sleep = (period > 1).then(|| PeriodicSleep::new(period));
    }

    pub fn clear_periodic_sleep(&mut self) {
        self.flags.periodic_sleep = None;
    }

    /// Leave the placeholder state once `initialize` has returned
    pub(crate) fn promote(&mut self) -> bool {
        if self.state == ProcessState::Uninitialized {
            self.state = ProcessState::Active;
            true
        } else {
            false
        }
    }

    #[inline]
    pub(crate) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    #[inline]
    pub(crate) fn clear_wait(&mut self) {
        self.wait_target = None;
    }

    #[inline]
    pub(crate) fn decrement_pause(&mut self) {
        self.pause_remaining = self.pause_remaining.saturating_sub(1);
    }

    #[inline]
    pub(crate) fn periodic_sleep_mut(&mut self) -> Option<&mut PeriodicSleep> {
        self.flags.periodic_sleep.as_mut()
    }

    /// Post-run accounting. Returns true if the kill-after countdown expired.
    pub(crate) fn record_run(&mut self) -> bool {
        self.runs += 1;
        let Some(remaining) = self.flags.kill_after.as_mut() else {
            return false;
        };
        if self.state.is_dead() {
            return false;
        }
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            self.flags.kill_after = None;
            self.kill()
        } else {
            false
        }
    }

    pub fn info(&self) -> ProcessInfo {
        ProcessInfo {
            pid: self.pid,
            meta: self.meta.clone(),
            cadence: self.cadence,
            state: self.state,
            parent: self.parent,
            wait_target: self.wait_target,
            pause_remaining: (self.state == ProcessState::Paused).then_some(self.pause_remaining),
            flags: self.flags,
            runs: self.runs,
        }
    }
}
