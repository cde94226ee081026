/*!
 * Command Line
 * Logger switches and run length for the demo binary
 */

use crate::core::config::parse_value;
use crate::core::ConfigError;
use crate::monitoring::{LogFile, TracingOptions};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// Environment variable giving the number of frames to run
pub const ENV_RUN_FRAMES: &str = "GLYPH_RUN_FRAMES";

/// Frames to run before shutting down
pub const DEFAULT_RUN_FRAMES: u64 = 120;

/// Glyph Kernel - cooperative process scheduler demo
#[derive(Parser, Debug)]
#[command(name = "glyph-kernel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Maximum log level: trace, debug, info, warn, error (or 1-5)
    #[arg(long, value_name = "LEVEL")]
    pub verbosity: Option<Level>,

    /// Log at debug level unless --verbosity says otherwise
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write the log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append to the log file instead of truncating it
    #[arg(long, requires = "log_file")]
    pub append: bool,

    /// Frames to run (also: GLYPH_RUN_FRAMES, default: 120)
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,
}

impl Cli {
    /// Subscriber options for these arguments, with `lookup` supplying the environment
    pub fn tracing_options<F>(&self, lookup: F) -> TracingOptions
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = self
            .verbosity
            .or_else(|| self.verbose.then_some(Level::DEBUG));

        TracingOptions {
            level,
            log_file: self.log_file.clone().map(|path| LogFile {
                path,
                append: self.append,
            }),
            ..TracingOptions::from_lookup(lookup)
        }
    }

    /// Frames to run: the flag, then `GLYPH_RUN_FRAMES`, then the default
    pub fn run_frames<F>(&self, lookup: F) -> Result<u64, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(frames) = self.frames {
            return Ok(frames);
        }
        match lookup(ENV_RUN_FRAMES) {
            Some(raw) => parse_value(ENV_RUN_FRAMES, &raw),
            None => Ok(DEFAULT_RUN_FRAMES),
        }
    }
}
