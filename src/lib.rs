/*!
 * Glyph Kernel Library
 * Cooperative process scheduling for the ASCII rendering engine
 */

pub mod assets;
pub mod cli;
pub mod core;
pub mod engine;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::core::{AssetError, ConfigError, EngineConfig, EngineError, EngineResult, Pid};
pub use assets::{AssetLoader, AssetManager, GlyphSheet, GlyphSheetLoader};
pub use engine::{Engine, FrameReport};
pub use monitoring::{init_tracing, init_tracing_with, TracingOptions};
pub use process::{
    Cadence, FnProcess, Process, ProcessContext, ProcessInfo, ProcessMeta, ProcessState,
};
pub use scheduler::{PassReport, Scheduler, SchedulerBuilder, SchedulerStats};
