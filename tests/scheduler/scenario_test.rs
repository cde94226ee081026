/*!
 * Cross-cadence scenarios
 * A per-tick child waiting on a per-frame parent with a kill-after countdown
 */

use crate::common::{counter, with_hook, Runs};
use glyph_kernel::{Cadence, Pid, ProcessState, Scheduler};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Parent (per frame, kill_after 5) whose `initialize` spawns a per-tick
/// child waiting on it. Returns (parent, child).
fn spawn_family(scheduler: &mut Scheduler, parent_runs: Runs, child_runs: Runs) -> (Pid, Pid) {
    let child_slot: Arc<Mutex<Option<Pid>>> = Arc::new(Mutex::new(None));

    let slot = Arc::clone(&child_slot);
    let parent = scheduler.create_root_process(
        counter("parent", Cadence::PerFrame, parent_runs).on_init(move |ctx| {
            ctx.kill_after(5);
            let child = ctx.create_process(counter("child", Cadence::PerTick, child_runs.clone())
                .on_init(|ctx| {
                    if let Some(parent) = ctx.parent() {
                        ctx.wait_for(parent);
                    }
                }));
            *slot.lock() = Some(child);
        }),
    );

    let child = child_slot.lock().unwrap();
    (parent, child)
}

#[test]
fn test_child_waits_for_five_parent_frames() {
    let mut scheduler = Scheduler::new();
    let parent_runs = Runs::new();
    let child_runs = Runs::new();
    let (parent, child) = spawn_family(&mut scheduler, parent_runs.clone(), child_runs.clone());

    assert_eq!(scheduler.state_of(child), Some(ProcessState::Waiting));
    assert_eq!(scheduler.children_of(parent), vec![child]);

    // Two ticks per frame, ticks first
    for frame in 1..=5 {
        for _ in 0..2 {
            let tick = scheduler.update_tick();
            assert!(!tick.did_run(child));
            assert_eq!(scheduler.state_of(child), Some(ProcessState::Waiting));
        }

        let report = scheduler.update_frame();
        assert!(report.did_run(parent));
        assert_eq!(parent_runs.get(), frame);
        if frame < 5 {
            assert_eq!(scheduler.state_of(parent), Some(ProcessState::Active));
        } else {
            assert_eq!(report.expired, vec![parent]);
            assert_eq!(report.swept, vec![parent]);
        }
    }

    // The frame pass that killed the parent never touches the per-tick child
    assert_eq!(scheduler.state_of(parent), None);
    assert_eq!(scheduler.state_of(child), Some(ProcessState::Waiting));
    assert_eq!(child_runs.get(), 0);

    let tick = scheduler.update_tick();
    assert!(tick.did_run(child));
    assert_eq!(scheduler.state_of(child), Some(ProcessState::Active));
    assert_eq!(scheduler.get_process_info(child).unwrap().wait_target, None);
    assert_eq!(child_runs.get(), 1);
}

#[test]
fn test_child_wakes_on_tick_after_parent_killed_mid_frame() {
    let mut scheduler = Scheduler::new();
    let child_runs = Runs::new();
    let (parent, child) = spawn_family(&mut scheduler, Runs::new(), child_runs.clone());

    // A per-frame assassin that kills the parent on its first run
    let assassin = scheduler.create_root_process(with_hook(
        "assassin",
        Cadence::PerFrame,
        Runs::new(),
        move |ctx, n| {
            if n == 1 {
                ctx.kill_process(parent);
            }
        },
    ));

    let frame = scheduler.update_frame();
    assert!(frame.did_run(assassin));
    assert!(frame.swept.contains(&parent));
    assert!(frame.transitions.iter().all(|t| t.pid != child));
    assert_eq!(scheduler.state_of(child), Some(ProcessState::Waiting));

    // Further frame passes still leave the child alone
    scheduler.update_frame();
    assert_eq!(scheduler.state_of(child), Some(ProcessState::Waiting));

    let tick = scheduler.update_tick();
    assert_eq!(tick.transitions.len(), 1);
    assert_eq!(tick.transitions[0].pid, child);
    assert!(tick.did_run(child));
    assert_eq!(child_runs.get(), 1);
}
