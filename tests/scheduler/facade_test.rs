/*!
 * Scheduler façade tests
 * Creation, PID-addressed control and introspection
 */

use crate::common::{counter, Runs};
use glyph_kernel::scheduler::AtomicSchedulerStats;
use glyph_kernel::{Cadence, FnProcess, Pid, ProcessMeta, ProcessState, Scheduler};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_create_runs_initialize_then_promotes() {
    let mut scheduler = Scheduler::new();
    let seen = Arc::new(Mutex::new(None));

    let seen_in_init = Arc::clone(&seen);
    let pid = scheduler.create_root_process(
        FnProcess::new(ProcessMeta::new("newborn"), Cadence::PerFrame, |_| {}).on_init(
            move |ctx| {
                *seen_in_init.lock() = Some(ctx.state());
            },
        ),
    );

    assert_eq!(*seen.lock(), Some(ProcessState::Uninitialized));
    assert_eq!(scheduler.state_of(pid), Some(ProcessState::Active));
    assert_eq!(scheduler.len(), 1);
}

#[test]
fn test_initialize_may_choose_waiting() {
    let mut scheduler = Scheduler::new();
    let target = scheduler.create_root_process(counter("target", Cadence::PerFrame, Runs::new()));

    let waiter = scheduler.create_root_process(
        FnProcess::new(ProcessMeta::new("waiter"), Cadence::PerTick, |_| {})
            .on_init(move |ctx| ctx.wait_for(target)),
    );

    let info = scheduler.get_process_info(waiter).unwrap();
    assert_eq!(info.state, ProcessState::Waiting);
    assert_eq!(info.wait_target, Some(target));
}

#[test]
fn test_initialize_may_kill_itself() {
    let mut scheduler = Scheduler::new();
    let runs = Runs::new();
    let pid = scheduler.create_root_process(
        counter("stillborn", Cadence::PerTick, runs.clone()).on_init(|ctx| ctx.kill()),
    );

    assert_eq!(scheduler.state_of(pid), Some(ProcessState::Dead));
    let report = scheduler.update_tick();
    assert!(!report.did_run(pid));
    assert_eq!(report.swept, vec![pid]);
    assert_eq!(runs.get(), 0);
    assert_eq!(scheduler.state_of(pid), None);
}

#[test]
fn test_pids_are_unique_and_never_reused() {
    let mut scheduler = Scheduler::new();
    let first = scheduler.create_root_process(counter("a", Cadence::PerTick, Runs::new()));
    scheduler.kill_process(first);
    scheduler.update_tick();

    let second = scheduler.create_root_process(counter("b", Cadence::PerTick, Runs::new()));
    assert_ne!(first, second);
    assert!(second > first);
}

#[test]
fn test_lookup_misses_are_soft() {
    let mut scheduler = Scheduler::new();
    let ghost = Pid::from_raw(4_242).unwrap();

    assert!(!scheduler.kill_process(ghost));
    assert!(!scheduler.pause_process(ghost, 3));
    assert_eq!(scheduler.get_process_info(ghost), None);
    assert_eq!(scheduler.state_of(ghost), None);
    assert!(scheduler.children_of(ghost).is_empty());
}

#[test]
fn test_kill_twice_reports_second_as_noop() {
    let mut scheduler = Scheduler::new();
    let pid = scheduler.create_root_process(counter("once", Cadence::PerFrame, Runs::new()));

    assert!(scheduler.kill_process(pid));
    assert!(!scheduler.kill_process(pid));
    // Still present until the next sweep, whichever cadence runs it
    assert_eq!(scheduler.state_of(pid), Some(ProcessState::Dead));
    let report = scheduler.update_tick();
    assert_eq!(report.swept, vec![pid]);
    assert_eq!(scheduler.state_of(pid), None);
}

#[test]
fn test_pause_process_from_outside() {
    let mut scheduler = Scheduler::new();
    let runs = Runs::new();
    let pid = scheduler.create_root_process(counter("paused", Cadence::PerFrame, runs.clone()));

    assert!(scheduler.pause_process(pid, 1));
    let info = scheduler.get_process_info(pid).unwrap();
    assert_eq!(info.state, ProcessState::Paused);
    assert_eq!(info.pause_remaining, Some(1));

    let ran: Vec<bool> = (0..3).map(|_| scheduler.update_frame().did_run(pid)).collect();
    assert_eq!(ran, vec![false, true, true]);
    assert_eq!(runs.get(), 2);
}

#[test]
fn test_children_and_listing() {
    let mut scheduler = Scheduler::new();
    let parent = scheduler.create_root_process(
        FnProcess::new(ProcessMeta::new("spawner"), Cadence::PerFrame, |_| {}).on_init(|ctx| {
            ctx.create_process(FnProcess::new(
                ProcessMeta::new("left").with_category("render"),
                Cadence::PerFrame,
                |_| {},
            ));
            ctx.create_process(FnProcess::new(
                ProcessMeta::new("right"),
                Cadence::PerTick,
                |_| {},
            ));
        }),
    );

    let mut children = scheduler.children_of(parent);
    children.sort();
    assert_eq!(children.len(), 2);
    for child in &children {
        assert_eq!(
            scheduler.get_process_info(*child).unwrap().parent,
            Some(parent)
        );
    }

    let mut names: Vec<String> = scheduler
        .list_processes()
        .into_iter()
        .map(|info| info.meta.name.to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["left", "right", "spawner"]);

    let left = scheduler
        .list_processes()
        .into_iter()
        .find(|info| info.meta.name.as_str() == "left")
        .unwrap();
    assert_eq!(left.meta.category.as_str(), "render");
    assert_eq!(left.cadence, Cadence::PerFrame);
}

#[test]
fn test_parent_death_does_not_cascade() {
    let mut scheduler = Scheduler::new();
    let parent = scheduler.create_root_process(
        FnProcess::new(ProcessMeta::new("parent"), Cadence::PerFrame, |_| {}).on_init(|ctx| {
            ctx.create_process(FnProcess::new(
                ProcessMeta::new("orphan"),
                Cadence::PerFrame,
                |_| {},
            ));
        }),
    );
    let child = scheduler.children_of(parent)[0];

    scheduler.kill_process(parent);
    scheduler.update_frame();

    assert_eq!(scheduler.state_of(parent), None);
    let info = scheduler.get_process_info(child).unwrap();
    assert_eq!(info.state, ProcessState::Active);
    assert_eq!(info.parent, Some(parent));
}

#[test]
fn test_shutdown_empties_scheduler() {
    let mut scheduler = Scheduler::new();
    for cadence in [Cadence::PerFrame, Cadence::PerTick, Cadence::PerTick] {
        scheduler.create_root_process(counter("bulk", cadence, Runs::new()));
    }

    let swept = scheduler.shutdown();
    assert_eq!(swept.len(), 3);
    assert!(scheduler.is_empty());
    assert_eq!(scheduler.stats().live_processes, 0);
}

#[test]
fn test_stats_track_passes_and_updates() {
    let shared = Arc::new(AtomicSchedulerStats::new());
    let mut scheduler = Scheduler::builder()
        .with_capacity(8)
        .with_stats(Arc::clone(&shared))
        .build();

    scheduler.create_root_process(counter("frame", Cadence::PerFrame, Runs::new()));
    let ticker = scheduler.create_root_process(
        counter("tick", Cadence::PerTick, Runs::new()).on_init(|ctx| ctx.kill_after(1)),
    );

    scheduler.update_tick();
    scheduler.update_frame();
    scheduler.update_frame();

    let stats = shared.snapshot();
    assert_eq!(stats.processes_created, 2);
    assert_eq!(stats.tick_passes, 1);
    assert_eq!(stats.frame_passes, 2);
    assert_eq!(stats.tick_updates, 1);
    assert_eq!(stats.frame_updates, 2);
    assert_eq!(stats.kill_after_expirations, 1);
    assert_eq!(stats.processes_swept, 1);
    assert_eq!(stats.live_processes, 1);
    assert_eq!(scheduler.state_of(ticker), None);
    assert_eq!(scheduler.stats(), stats);
}

#[test]
fn test_pass_numbers_are_per_scheduler() {
    let shared = Arc::new(AtomicSchedulerStats::new());
    let mut left = Scheduler::builder().with_stats(Arc::clone(&shared)).build();
    let mut right = Scheduler::builder().with_stats(Arc::clone(&shared)).build();

    let passes: Vec<u64> = vec![
        left.update_frame().pass,
        right.update_frame().pass,
        left.update_frame().pass,
        right.update_frame().pass,
        right.update_tick().pass,
    ];
    assert_eq!(passes, vec![1, 1, 2, 2, 1]);

    // The shared block still sees every pass
    let stats = shared.snapshot();
    assert_eq!(stats.frame_passes, 4);
    assert_eq!(stats.tick_passes, 1);
}
