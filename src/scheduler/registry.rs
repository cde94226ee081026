/*!
 * Process Registry
 *
 * Sole owner of every process. Callers only ever see PIDs; all access goes
 * through a lookup at the time of use. Destruction is two-phase: `destroy`
 * marks a process DEAD immediately, `sweep` erases dead entries once the
 * current pass is over, so traversals never observe a structural removal.
 */

use super::atomic_stats::AtomicSchedulerStats;
use crate::core::{Pid, PidAllocator};
use crate::process::{Cadence, ControlBlock, Process, ProcessContext, ProcessState};
use ahash::RandomState;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// One registry entry: the scheduler's bookkeeping plus the process itself.
///
/// `behavior` is `None` only while the process's own `initialize`/`update` is
/// on the stack, which is what lets that callback mutate the registry.
struct Slot {
    control: ControlBlock,
    behavior: Option<Box<dyn Process>>,
}

pub struct ProcessRegistry {
    slots: HashMap<Pid, Slot, RandomState>,
    pids: PidAllocator,
    stats: Arc<AtomicSchedulerStats>,
    // Per-registry pass numbers; the stats block may be shared
    frame_passes: u64,
    tick_passes: u64,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::with_capacity(0, Arc::new(AtomicSchedulerStats::new()))
    }

    pub fn with_capacity(capacity: usize, stats: Arc<AtomicSchedulerStats>) -> Self {
        Self {
            slots: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            pids: PidAllocator::new(),
            stats,
            frame_passes: 0,
            tick_passes: 0,
        }
    }

    /// Allocate a PID, run `initialize`, and promote to ACTIVE unless
    /// `initialize` picked another state
    pub fn create(&mut self, parent: Option<Pid>, mut process: Box<dyn Process>) -> Pid {
        let pid = self.pids.next();
        let meta = process.meta();
        let cadence = process.cadence();
        let name = meta.name.clone();

        self.slots.insert(
            pid,
            Slot {
                control: ControlBlock::new(pid, parent, meta, cadence),
                behavior: None,
            },
        );
        self.stats.inc_created();

        process.initialize(&mut ProcessContext::new(self, pid));

        // Initialization may kill the process but never removes its slot
        let state = match self.slots.get_mut(&pid) {
            Some(slot) => {
                slot.behavior = Some(process);
                slot.control.promote();
                slot.control.state()
            }
            None => ProcessState::Dead,
        };

        info!(
            "Created process: {} (PID: {}, parent: {:?}, cadence: {}, state: {})",
            name, pid, parent, cadence, state
        );
        pid
    }

    #[inline]
    pub fn get(&self, pid: Pid) -> Option<&ControlBlock> {
        self.slots.get(&pid).map(|slot| &slot.control)
    }

    #[inline]
    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut ControlBlock> {
        self.slots.get_mut(&pid).map(|slot| &mut slot.control)
    }

    #[inline]
    pub fn contains(&self, pid: Pid) -> bool {
        self.slots.contains_key(&pid)
    }

    /// Mark for removal. The entry stays until the next sweep.
    pub fn destroy(&mut self, pid: Pid) -> bool {
        match self.get_mut(pid) {
            Some(cb) => {
                let killed = cb.kill();
                if killed {
                    debug!("PID {} marked dead", pid);
                }
                killed
            }
            None => false,
        }
    }

    pub fn pause(&mut self, pid: Pid, slices: u32) -> bool {
        self.get_mut(pid).is_some_and(|cb| cb.pause(slices))
    }

    pub fn wait_for(&mut self, pid: Pid, target: Pid) -> bool {
        self.get_mut(pid).is_some_and(|cb| cb.wait_for(target))
    }

    /// PIDs of `cadence`, in registry order, as of this call
    pub fn pids_by_cadence(&self, cadence: Cadence) -> Vec<Pid> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.control.cadence() == cadence)
            .map(|(pid, _)| *pid)
            .collect()
    }

    /// Visit every process of `cadence` that exists when the traversal starts.
    ///
    /// `visit` may create, kill or pause processes. Processes created during
    /// the traversal are not visited; killed ones are still visited (as DEAD)
    /// because erasure waits for [`sweep`](Self::sweep).
    pub fn for_each_by_cadence<F>(&mut self, cadence: Cadence, mut visit: F)
    where
        F: FnMut(&mut Self, Pid),
    {
        for pid in self.pids_by_cadence(cadence) {
            visit(self, pid);
        }
    }

    /// Call `update` on `pid` if it is ACTIVE right now. Returns whether it ran.
    pub fn run_update(&mut self, pid: Pid) -> bool {
        let mut process = match self.slots.get_mut(&pid) {
            Some(slot) if slot.control.state().is_active() => match slot.behavior.take() {
                Some(process) => process,
                None => {
                    warn!("PID {} is already running; skipping re-entrant update", pid);
                    return false;
                }
            },
            _ => return false,
        };

        process.update(&mut ProcessContext::new(self, pid));

        if let Some(slot) = self.slots.get_mut(&pid) {
            slot.behavior = Some(process);
        }
        true
    }

    /// Erase every DEAD process. Returns the erased PIDs.
    pub fn sweep(&mut self) -> Vec<Pid> {
        let mut swept = Vec::new();
        self.slots.retain(|pid, slot| {
            // A slot without its behavior is mid-callback; leave it for the next sweep
            let erase = slot.control.state().is_dead() && slot.behavior.is_some();
            if erase {
                swept.push(*pid);
            }
            !erase
        });

        if !swept.is_empty() {
            self.stats.add_swept(swept.len());
            debug!("Swept {} dead process(es): {:?}", swept.len(), swept);
        }
        swept
    }

    /// Kill every process; the next sweep empties the registry
    pub fn kill_all(&mut self) -> usize {
        self.slots
            .values_mut()
            .map(|slot| slot.control.kill())
            .filter(|killed| *killed)
            .count()
    }

    /// Live children of `parent`, via their parent back-references
    pub fn children_of(&self, parent: Pid) -> Vec<Pid> {
        self.slots
            .values()
            .filter(|slot| slot.control.parent() == Some(parent))
            .map(|slot| slot.control.pid())
            .collect()
    }

    /// Start the next pass of `cadence`. Returns its 1-based number for this
    /// registry and counts it in the stats block.
    pub fn begin_pass(&mut self, cadence: Cadence) -> u64 {
        self.stats.inc_pass(cadence);
        let counter = match cadence {
            Cadence::PerFrame => &mut self.frame_passes,
            Cadence::PerTick => &mut self.tick_passes,
        };
        *counter += 1;
        *counter
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlBlock> {
        self.slots.values().map(|slot| &slot.control)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> &Arc<AtomicSchedulerStats> {
        &self.stats
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcessRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRegistry")
            .field("len", &self.slots.len())
            .field("next_pid", &self.pids.peek())
            .finish()
    }
}
