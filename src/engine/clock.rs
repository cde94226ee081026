/*!
 * Fixed-Step Tick Clock
 * Converts wall-clock frame time into a whole number of simulation ticks
 */

use std::time::Duration;

/// Ticks owed for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickBudget {
    pub ticks: u32,
    /// Time discarded because the catch-up cap was hit
    pub dropped: Duration,
}

#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    max_ticks: u32,
    accumulator: Duration,
}

impl TickClock {
    pub fn new(interval: Duration, max_ticks: u32) -> Self {
        Self {
            interval: interval.max(Duration::from_nanos(1)),
            max_ticks: max_ticks.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Bank `elapsed` and withdraw as many whole ticks as the cap allows.
    ///
    /// Constant time in `elapsed`: whole intervals are counted by division.
    pub fn advance(&mut self, elapsed: Duration) -> TickBudget {
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let interval = self.interval.as_nanos();
        let banked = self.accumulator.as_nanos();
        let owed = banked / interval;
        let ticks = u32::try_from(owed).map_or(self.max_ticks, |owed| owed.min(self.max_ticks));

        // Keep the partial tick, drop whole ticks beyond the cap
        let dropped_ticks = owed - u128::from(ticks);
        self.accumulator = from_nanos(banked % interval);

        TickBudget {
            ticks,
            dropped: from_nanos(interval.saturating_mul(dropped_ticks)),
        }
    }

    /// Banked time not yet worth a full tick
    #[inline]
    pub fn pending(&self) -> Duration {
        self.accumulator
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn from_nanos(nanos: u128) -> Duration {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    // Always below one second
    let subsec = (nanos % NANOS_PER_SEC) as u32;
    Duration::new(secs, subsec)
}
