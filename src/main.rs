/*!
 * Glyph Kernel - Demo Entry Point
 *
 * Boots the scheduler inside the fixed-timestep engine driver with a handful
 * of processes:
 * - a per-frame glyph render pass
 * - a timed event that lives for five frames and chains a per-tick follow-up
 * - a per-tick blinker that only runs every fourth tick
 */

use clap::Parser;
use glyph_kernel::cli::Cli;
use glyph_kernel::{
    init_tracing_with, AssetError, AssetManager, Cadence, Engine, EngineConfig, GlyphSheet,
    Process, ProcessContext, ProcessMeta,
};
use std::sync::Arc;
use tracing::info;

const BANNER: &str = "\
+--------------+
| glyph kernel |
+--------------+
";

struct RenderPass {
    sheet: Arc<GlyphSheet>,
    frames: u64,
}

impl Process for RenderPass {
    fn meta(&self) -> ProcessMeta {
        ProcessMeta::new("render-pass")
            .with_description("submits the banner glyph grid once per frame")
            .with_category("render")
    }

    fn cadence(&self) -> Cadence {
        Cadence::PerFrame
    }

    fn update(&mut self, _ctx: &mut ProcessContext<'_>) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            info!(
                frames = self.frames,
                cells = self.sheet.width() * self.sheet.height(),
                "render pass"
            );
        }
    }
}

struct TimedEvent;

impl Process for TimedEvent {
    fn meta(&self) -> ProcessMeta {
        ProcessMeta::new("timed-event").with_category("event")
    }

    fn cadence(&self) -> Cadence {
        Cadence::PerFrame
    }

    fn initialize(&mut self, ctx: &mut ProcessContext<'_>) {
        ctx.kill_after(5);
        ctx.create_process(Aftermath { ran: false });
    }

    fn update(&mut self, ctx: &mut ProcessContext<'_>) {
        info!(pid = %ctx.pid(), "timed event firing");
    }
}

struct Aftermath {
    ran: bool,
}

impl Process for Aftermath {
    fn meta(&self) -> ProcessMeta {
        ProcessMeta::new("aftermath")
            .with_description("runs once after its parent event has finished")
            .with_category("simulate")
    }

    fn cadence(&self) -> Cadence {
        Cadence::PerTick
    }

    fn initialize(&mut self, ctx: &mut ProcessContext<'_>) {
        if let Some(parent) = ctx.parent() {
            ctx.wait_for(parent);
        }
    }

    fn update(&mut self, ctx: &mut ProcessContext<'_>) {
        if !self.ran {
            info!(pid = %ctx.pid(), "parent event finished; running aftermath");
            self.ran = true;
        }
        ctx.kill();
    }
}

struct Blinker {
    lit: bool,
}

impl Process for Blinker {
    fn meta(&self) -> ProcessMeta {
        ProcessMeta::new("cursor-blink").with_category("simulate")
    }

    fn cadence(&self) -> Cadence {
        Cadence::PerTick
    }

    fn initialize(&mut self, ctx: &mut ProcessContext<'_>) {
        ctx.periodic_sleep(4);
    }

    fn update(&mut self, _ctx: &mut ProcessContext<'_>) {
        self.lit = !self.lit;
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let env = |key: &str| std::env::var(key).ok();
    init_tracing_with(&cli.tracing_options(env))?;

    info!("Glyph kernel starting...");
    let config = EngineConfig::from_env()?;
    let frames = cli.run_frames(env)?;

    let assets = AssetManager::new();
    assets.register(|key: &str| -> Result<GlyphSheet, AssetError> {
        GlyphSheet::parse(key, BANNER)
    });
    let sheet = assets.load::<GlyphSheet>("banner")?;

    let mut engine = Engine::with_config(config)?;
    let scheduler = engine.scheduler_mut();
    scheduler.create_root_process(RenderPass { sheet, frames: 0 });
    scheduler.create_root_process(TimedEvent);
    scheduler.create_root_process(Blinker { lit: false });

    let ran = engine.run_for(frames)?;
    let stats = engine.scheduler().stats();
    info!(
        frames = ran,
        stats = %serde_json::to_string(&stats).unwrap_or_default(),
        "Run complete"
    );

    engine.shutdown();
    Ok(())
}
