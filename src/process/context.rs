/*!
 * Process Context
 *
 * Handle passed to `initialize` and `update`. A process addresses itself and
 * every other process through PIDs resolved against the registry at call
 * time; it never holds a reference to another process.
 */

use super::traits::Process;
use super::types::{ProcessInfo, ProcessState};
use crate::core::Pid;
use crate::scheduler::registry::ProcessRegistry;

pub struct ProcessContext<'a> {
    registry: &'a mut ProcessRegistry,
    pid: Pid,
}

impl<'a> ProcessContext<'a> {
    pub(crate) fn new(registry: &'a mut ProcessRegistry, pid: Pid) -> Self {
        Self { registry, pid }
    }

    /// PID of the running process
    #[inline(always)]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Parent PID, if this process was created by another
    pub fn parent(&self) -> Option<Pid> {
        self.registry.get(self.pid).and_then(|cb| cb.parent())
    }

    /// Current state of the running process
    pub fn state(&self) -> ProcessState {
        self.registry
            .get(self.pid)
            .map_or(ProcessState::Dead, |cb| cb.state())
    }

    /// Skip the next `slices` time slices of this process's cadence
    pub fn sleep(&mut self, slices: u32) {
        self.registry.pause(self.pid, slices);
    }

    /// Stop running until `target` is dead or gone
    pub fn wait_for(&mut self, target: Pid) {
        self.registry.wait_for(self.pid, target);
    }

    /// Mark this process dead; it is swept after the current pass
    pub fn kill(&mut self) {
        self.registry.destroy(self.pid);
    }

    /// Die after `runs` more runs (counting the current one if called from `update`)
    pub fn kill_after(&mut self, runs: u32) {
        if let Some(cb) = self.registry.get_mut(self.pid) {
            cb.kill_after(runs);
        }
    }

    /// Run only every `period`-th eligible time slice
    pub fn periodic_sleep(&mut self, period: u32) {
        if let Some(cb) = self.registry.get_mut(self.pid) {
            cb.set_periodic_sleep(period);
        }
    }

    pub fn clear_periodic_sleep(&mut self) {
        if let Some(cb) = self.registry.get_mut(self.pid) {
            cb.clear_periodic_sleep();
        }
    }

    /// Pause any process by PID. False if no such process.
    pub fn pause_process(&mut self, pid: Pid, slices: u32) -> bool {
        self.registry.pause(pid, slices)
    }

    /// Kill any process by PID. False if no such process or already dead.
    pub fn kill_process(&mut self, pid: Pid) -> bool {
        self.registry.destroy(pid)
    }

    /// Create a child of the running process. It becomes eligible to run on
    /// its cadence's next pass, never the pass that created it.
    pub fn create_process<P: Process>(&mut self, process: P) -> Pid {
        self.registry.create(Some(self.pid), Box::new(process))
    }

    pub fn get_process_info(&self, pid: Pid) -> Option<ProcessInfo> {
        self.registry.get(pid).map(|cb| cb.info())
    }

    pub fn state_of(&self, pid: Pid) -> Option<ProcessState> {
        self.registry.get(pid).map(|cb| cb.state())
    }
}
