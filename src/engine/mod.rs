/*!
 * Engine Driver
 *
 * Orders the scheduler's two independent passes on a fixed timestep: each
 * frame first runs every simulation tick that has come due, then exactly
 * one frame pass.
 */

pub mod clock;

pub use clock::{TickBudget, TickClock};

use crate::core::{EngineConfig, EngineError, EngineResult, Pid};
use crate::scheduler::{PassReport, Scheduler};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Everything that happened during one `advance`
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub ticks: Vec<PassReport>,
    pub frame: PassReport,
    pub dropped: Duration,
}

pub struct Engine {
    scheduler: Scheduler,
    clock: TickClock,
    config: EngineConfig,
    frames: u64,
    shut_down: bool,
}

impl Engine {
    /// Validate `config` and take ownership of `scheduler`
    pub fn new(scheduler: Scheduler, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        info!(
            tick_rate_hz = config.tick_rate_hz,
            frame_rate_hz = config.frame_rate_hz,
            max_ticks_per_frame = config.max_ticks_per_frame,
            "Engine started"
        );
        Ok(Self {
            clock: TickClock::new(config.tick_interval(), config.max_ticks_per_frame),
            scheduler,
            config,
            frames: 0,
            shut_down: false,
        })
    }

    /// Build a scheduler from `config` and start the engine around it
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        let scheduler = Scheduler::builder().with_config(config.clone()).build();
        Self::new(scheduler, config)
    }

    /// Run the ticks owed for `elapsed`, then one frame
    pub fn advance(&mut self, elapsed: Duration) -> EngineResult<FrameReport> {
        if self.shut_down {
            return Err(EngineError::ShutDown);
        }

        let budget = self.clock.advance(elapsed);
        if !budget.dropped.is_zero() {
            warn!(dropped = ?budget.dropped, "Simulation fell behind; dropping ticks");
        }

        let ticks = (0..budget.ticks)
            .map(|_| self.scheduler.update_tick())
            .collect();
        let frame = self.scheduler.update_frame();
        self.frames += 1;

        Ok(FrameReport {
            ticks,
            frame,
            dropped: budget.dropped,
        })
    }

    /// Drive `frames` frames in real time, sleeping out the rest of each frame
    pub fn run_for(&mut self, frames: u64) -> EngineResult<u64> {
        let frame_interval = self.config.frame_interval();
        let mut last = Instant::now();
        let mut ran = 0;

        while ran < frames {
            let now = Instant::now();
            self.advance(now - last)?;
            last = now;
            ran += 1;

            if self.scheduler.is_empty() {
                info!(frames = ran, "No processes left; stopping early");
                break;
            }

            let spent = last.elapsed();
            if spent < frame_interval {
                std::thread::sleep(frame_interval - spent);
            }
        }
        Ok(ran)
    }

    /// Kill and sweep every process. The engine refuses to advance afterwards.
    pub fn shutdown(&mut self) -> Vec<Pid> {
        if self.shut_down {
            return Vec::new();
        }
        self.shut_down = true;
        let swept = self.scheduler.shutdown();
        info!(frames = self.frames, swept = swept.len(), "Engine shut down");
        swept
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
