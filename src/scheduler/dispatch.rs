/*!
 * Dispatcher
 *
 * One pass per cadence: transitions, then updates, then kill-after
 * accounting, then the sweep. Update callbacks may create, kill or pause any
 * process; nothing is erased until the sweep at the end of the pass.
 */

use super::registry::ProcessRegistry;
use super::transition::{self, Transition};
use crate::core::serde::is_empty_vec;
use crate::core::Pid;
use crate::monitoring::span_pass;
use crate::process::Cadence;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What one dispatch pass did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PassReport {
    pub cadence: Cadence,
    /// 1-based pass number for this cadence on this scheduler
    pub pass: u64,
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub transitions: Vec<Transition>,
    /// PIDs whose update ran, in execution order
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub ran: Vec<Pid>,
    /// PIDs killed by their kill-after countdown this pass
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub expired: Vec<Pid>,
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub swept: Vec<Pid>,
}

impl PassReport {
    #[inline]
    pub fn did_run(&self, pid: Pid) -> bool {
        self.ran.contains(&pid)
    }
}

/// Run one full pass for `cadence`
pub fn dispatch(registry: &mut ProcessRegistry, cadence: Cadence) -> PassReport {
    let stats = registry.stats().clone();
    let pass = registry.begin_pass(cadence);
    let _span = span_pass(cadence, pass).entered();

    // 1. Every transition of this cadence happens-before any update
    let transitions = transition::run(registry, cadence);

    // 2. Execution, over a snapshot: children spawned now wait for the next pass
    let eligible: Vec<Pid> = registry
        .pids_by_cadence(cadence)
        .into_iter()
        .filter(|pid| registry.get(*pid).is_some_and(|cb| cb.state().is_active()))
        .collect();

    let mut ran = Vec::with_capacity(eligible.len());
    for pid in eligible {
        // Re-checked per call: an earlier update this pass may have killed or paused it
        if registry.run_update(pid) {
            trace!(%pid, "update ran");
            ran.push(pid);
        }
    }

    // 3. Kill-after accounting for processes that actually ran
    let expired: Vec<Pid> = ran
        .iter()
        .copied()
        .filter(|pid| registry.get_mut(*pid).is_some_and(|cb| cb.record_run()))
        .collect();

    // 4. Sweep
    let swept = registry.sweep();

    stats.add_updates(cadence, ran.len());
    stats.add_expirations(expired.len());
    tracing::debug!(
        transitions = transitions.len(),
        ran = ran.len(),
        expired = expired.len(),
        swept = swept.len(),
        "pass complete"
    );

    PassReport {
        cadence,
        pass,
        transitions,
        ran,
        expired,
        swept,
    }
}

/// Kill every process and sweep. The registry is empty afterwards.
pub fn shutdown(registry: &mut ProcessRegistry) -> Vec<Pid> {
    let killed = registry.kill_all();
    let swept = registry.sweep();
    tracing::info!(killed, swept = swept.len(), "scheduler shut down");
    debug_assert!(registry.is_empty());
    swept
}
