/*!
 * State Transition Engine
 *
 * Runs once per cadence pass, over every process of that cadence, strictly
 * before any update callback of the same pass:
 *
 * | From    | Condition                                 | To      |
 * |---------|-------------------------------------------|---------|
 * | WAITING | wait target dead or missing               | ACTIVE  |
 * | PAUSED  | pause counter at 0                        | ACTIVE  |
 * | PAUSED  | pause counter > 0                         | PAUSED (counter - 1) |
 * | ACTIVE  | periodic sleep says skip this slice       | PAUSED (counter 0)   |
 *
 * DEAD never leaves DEAD. Kill-after expiry happens after the run, in the
 * dispatcher, not here.
 */

use super::registry::ProcessRegistry;
use crate::core::Pid;
use crate::process::{Cadence, ProcessState};
use serde::{Deserialize, Serialize};

/// One state change made by the transition pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transition {
    pub pid: Pid,
    pub from: ProcessState,
    pub to: ProcessState,
}

/// Evaluate the state table for every process of `cadence`
pub fn run(registry: &mut ProcessRegistry, cadence: Cadence) -> Vec<Transition> {
    let mut transitions = Vec::new();
    registry.for_each_by_cadence(cadence, |registry, pid| {
        if let Some(transition) = step(registry, pid) {
            transitions.push(transition);
        }
    });
    transitions
}

/// Evaluate the state table for a single process
pub fn step(registry: &mut ProcessRegistry, pid: Pid) -> Option<Transition> {
    let (from, wait_target) = {
        let cb = registry.get(pid)?;
        (cb.state(), cb.wait_target())
    };

    // Resolved before taking the mutable borrow; a vanished target counts as dead
    let target_released = wait_target.map_or(true, |target| {
        registry
            .get(target)
            .map_or(true, |target_cb| target_cb.state().is_dead())
    });

    let cb = registry.get_mut(pid)?;
    match from {
        ProcessState::Waiting if target_released => {
            cb.clear_wait();
            cb.set_state(ProcessState::Active);
        }
        ProcessState::Paused if cb.pause_remaining() == 0 => {
            cb.set_state(ProcessState::Active);
        }
        ProcessState::Paused => {
            cb.decrement_pause();
        }
        _ => {}
    }

    // A process that just woke up still honours its periodic sleep this slice
    let skip = cb.state().is_active()
        && cb
            .periodic_sleep_mut()
            .is_some_and(|periodic| periodic.skip_slice());
    if skip {
        cb.pause(0);
    }

    let to = cb.state();
    (to != from).then_some(Transition { pid, from, to })
}
