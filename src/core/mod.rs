/*!
 * Core Module
 * Fundamental engine types, configuration and error handling
 */

pub mod config;
pub mod errors;
pub mod id;
pub mod limits;
pub mod serde;

// Re-export for convenience
pub use config::EngineConfig;
pub use errors::*;
pub use id::{Pid, PidAllocator};
