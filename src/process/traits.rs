/*!
 * Process Traits
 * The contract every schedulable unit implements
 */

use super::context::ProcessContext;
use super::types::{Cadence, ProcessMeta};

/// A schedulable unit with one update entry point
///
/// The scheduler reads [`meta`](Process::meta) and [`cadence`](Process::cadence)
/// once at creation. `initialize` runs exactly once, before the process is
/// eligible to run, and may put the process into any state (most commonly
/// `wait_for` a parent). `update` is only ever called while the process is
/// ACTIVE.
pub trait Process: Send + 'static {
    fn meta(&self) -> ProcessMeta;

    fn cadence(&self) -> Cadence;

    fn initialize(&mut self, _ctx: &mut ProcessContext<'_>) {}

    fn update(&mut self, ctx: &mut ProcessContext<'_>);
}

type InitFn = Box<dyn FnMut(&mut ProcessContext<'_>) + Send>;
type UpdateFn = Box<dyn FnMut(&mut ProcessContext<'_>) + Send>;

/// Process built from closures, for chained behaviors and timed events that
/// don't warrant their own type
pub struct FnProcess {
    meta: ProcessMeta,
    cadence: Cadence,
    init: Option<InitFn>,
    update: UpdateFn,
}

impl FnProcess {
    pub fn new<F>(meta: ProcessMeta, cadence: Cadence, update: F) -> Self
    where
        F: FnMut(&mut ProcessContext<'_>) + Send + 'static,
    {
        Self {
            meta,
            cadence,
            init: None,
            update: Box::new(update),
        }
    }

    /// Run `init` from [`Process::initialize`]
    #[must_use]
    pub fn on_init<F>(mut self, init: F) -> Self
    where
        F: FnMut(&mut ProcessContext<'_>) + Send + 'static,
    {
        self.init = Some(Box::new(init));
        self
    }
}

impl Process for FnProcess {
    fn meta(&self) -> ProcessMeta {
        self.meta.clone()
    }

    fn cadence(&self) -> Cadence {
        self.cadence
    }

    fn initialize(&mut self, ctx: &mut ProcessContext<'_>) {
        if let Some(init) = self.init.as_mut() {
            init(ctx);
        }
    }

    fn update(&mut self, ctx: &mut ProcessContext<'_>) {
        (self.update)(ctx);
    }
}

impl std::fmt::Debug for FnProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProcess")
            .field("meta", &self.meta)
            .field("cadence", &self.cadence)
            .field("has_init", &self.init.is_some())
            .finish()
    }
}
