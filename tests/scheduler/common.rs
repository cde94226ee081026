/*!
 * Shared test processes
 */

use glyph_kernel::{Cadence, FnProcess, Pid, ProcessContext, ProcessMeta, ProcessState};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Shared run counter
#[derive(Clone, Default)]
pub struct Runs(Arc<AtomicU32>);

impl Runs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Updates seen with a state other than ACTIVE
#[derive(Clone, Default)]
pub struct Violations(Arc<Mutex<Vec<(Pid, ProcessState)>>>);

impl Violations {
    pub fn check(&self, ctx: &ProcessContext<'_>) {
        let state = ctx.state();
        if state != ProcessState::Active {
            self.0.lock().push((ctx.pid(), state));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

/// Process that only counts its runs
pub fn counter(name: &str, cadence: Cadence, runs: Runs) -> FnProcess {
    FnProcess::new(ProcessMeta::new(name), cadence, move |_| {
        runs.bump();
    })
}

/// Process that counts runs and hands each run number to `on_run`
pub fn with_hook<F>(name: &str, cadence: Cadence, runs: Runs, mut on_run: F) -> FnProcess
where
    F: FnMut(&mut ProcessContext<'_>, u32) + Send + 'static,
{
    FnProcess::new(ProcessMeta::new(name), cadence, move |ctx| {
        let n = runs.bump();
        on_run(ctx, n);
    })
}
