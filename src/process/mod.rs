/*!
 * Process Module
 * Process contract, control block and per-process types
 */

pub mod context;
pub mod control;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use context::ProcessContext;
pub use control::ControlBlock;
pub use traits::{FnProcess, Process};
pub use types::{Cadence, PeriodicSleep, ProcessFlags, ProcessInfo, ProcessMeta, ProcessState};
