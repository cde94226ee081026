/*!
 * Engine Limits and Constants
 *
 * Defaults for the frame driver and process registry, grouped by domain.
 */

use std::time::Duration;

// =============================================================================
// CADENCE
// =============================================================================

/// Simulation ticks per second
pub const DEFAULT_TICK_RATE_HZ: u32 = 20;

/// Rendered frames per second
pub const DEFAULT_FRAME_RATE_HZ: u32 = 60;

/// Ticks the driver will run to catch up within one frame.
/// Anything beyond is dropped so a long stall cannot snowball.
pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 5;

/// Highest accepted tick or frame rate. Keeps every period a whole number
/// of microseconds, well clear of `period_of` truncating to zero.
pub const MAX_RATE_HZ: u32 = 10_000;

/// Duration of one period at `hz`
#[inline]
pub fn period_of(hz: u32) -> Duration {
    Duration::from_secs(1) / hz.max(1)
}

// =============================================================================
// PROCESS REGISTRY
// =============================================================================

/// Slots reserved in the registry map up front
pub const DEFAULT_REGISTRY_CAPACITY: usize = 64;

/// Default process category when a process declares none
pub const DEFAULT_PROCESS_CATEGORY: &str = "general";
