/*!
 * Scheduler Module
 *
 * The façade game and render code talks to. It owns the process registry
 * and exposes PID-addressed control plus the two independent dispatch
 * entry points, `update_frame` and `update_tick`.
 */

pub mod atomic_stats;
pub mod dispatch;
pub mod registry;
pub mod transition;

pub use atomic_stats::{AtomicSchedulerStats, SchedulerStats};
pub use dispatch::PassReport;
pub use registry::ProcessRegistry;
pub use transition::Transition;

use crate::core::{EngineConfig, Pid};
use crate::process::{Cadence, Process, ProcessInfo, ProcessState};
use log::info;
use std::sync::Arc;

/// Builder for Scheduler
pub struct SchedulerBuilder {
    config: EngineConfig,
    stats: Option<Arc<AtomicSchedulerStats>>,
}

impl SchedulerBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            stats: None,
        }
    }

    /// Use `config` (only `initial_capacity` matters to the scheduler itself)
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Report into an existing stats block, e.g. one a monitor thread already holds
    pub fn with_stats(mut self, stats: Arc<AtomicSchedulerStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn build(self) -> Scheduler {
        let stats = self
            .stats
            .unwrap_or_else(|| Arc::new(AtomicSchedulerStats::new()));
        info!(
            "Scheduler initialized (capacity: {})",
            self.config.initial_capacity
        );
        Scheduler {
            registry: ProcessRegistry::with_capacity(self.config.initial_capacity, stats),
            config: self.config,
        }
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Cooperative process scheduler
///
/// Single-threaded: one update callback runs at a time and is never
/// interrupted. Explicitly constructed and owned by the engine; there is no
/// global instance.
#[derive(Debug)]
pub struct Scheduler {
    registry: ProcessRegistry,
    config: EngineConfig,
}

impl Scheduler {
    pub fn new() -> Self {
        SchedulerBuilder::new().build()
    }

    pub fn builder() -> SchedulerBuilder {
        SchedulerBuilder::new()
    }

    /// Create a process under `parent` (or at the root). It runs `initialize`
    /// immediately and is ACTIVE afterwards unless `initialize` chose otherwise.
    pub fn create_process<P: Process>(&mut self, parent: Option<Pid>, process: P) -> Pid {
        self.registry.create(parent, Box::new(process))
    }

    /// Create a process with no parent
    pub fn create_root_process<P: Process>(&mut self, process: P) -> Pid {
        self.create_process(None, process)
    }

    /// Pause `pid` for `slices` slices of its cadence. False on lookup miss.
    pub fn pause_process(&mut self, pid: Pid, slices: u32) -> bool {
        self.registry.pause(pid, slices)
    }

    /// Kill `pid`. False on lookup miss or if it was already dead.
    pub fn kill_process(&mut self, pid: Pid) -> bool {
        self.registry.destroy(pid)
    }

    pub fn get_process_info(&self, pid: Pid) -> Option<ProcessInfo> {
        self.registry.get(pid).map(|cb| cb.info())
    }

    pub fn state_of(&self, pid: Pid) -> Option<ProcessState> {
        self.registry.get(pid).map(|cb| cb.state())
    }

    pub fn list_processes(&self) -> Vec<ProcessInfo> {
        self.registry.iter().map(|cb| cb.info()).collect()
    }

    pub fn children_of(&self, pid: Pid) -> Vec<Pid> {
        self.registry.children_of(pid)
    }

    /// Run the per-frame pass
    pub fn update_frame(&mut self) -> PassReport {
        dispatch::dispatch(&mut self.registry, Cadence::PerFrame)
    }

    /// Run the per-tick pass
    pub fn update_tick(&mut self) -> PassReport {
        dispatch::dispatch(&mut self.registry, Cadence::PerTick)
    }

    /// Kill and sweep every process. Returns the swept PIDs.
    pub fn shutdown(&mut self) -> Vec<Pid> {
        dispatch::shutdown(&mut self.registry)
    }

    pub fn stats(&self) -> SchedulerStats {
        self.registry.stats().snapshot()
    }

    /// Shared handle to the live counters
    pub fn stats_handle(&self) -> Arc<AtomicSchedulerStats> {
        Arc::clone(self.registry.stats())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
