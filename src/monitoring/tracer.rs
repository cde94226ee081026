/*!
 * Structured Tracing
 * Subscriber setup and the span every dispatch pass runs inside
 */

use crate::core::ConfigError;
use crate::process::Cadence;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug_span, info, Level, Span};
use tracing_subscriber::{
    filter::LevelFilter, fmt, fmt::format::FmtSpan, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter,
};

/// Environment variable selecting JSON output
pub const ENV_TRACE_JSON: &str = "GLYPH_TRACE_JSON";

/// A file receiving a plain-text copy of the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    /// Keep existing contents instead of truncating
    pub append: bool,
}

impl LogFile {
    fn open(&self) -> Result<File, ConfigError> {
        let mut options = OpenOptions::new();
        options.create(true).write(true);
        if self.append {
            options.append(true);
        } else {
            options.truncate(true);
        }
        options.open(&self.path).map_err(|e| ConfigError::LogFile {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// How the subscriber should be built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracingOptions {
    /// Fixed maximum level. `None` defers to RUST_LOG.
    pub level: Option<Level>,
    pub json: bool,
    pub log_file: Option<LogFile>,
}

impl TracingOptions {
    /// Defaults with JSON output taken from `GLYPH_TRACE_JSON`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with JSON output taken from whatever `lookup` returns
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            json: lookup(ENV_TRACE_JSON).is_some_and(|v| v == "1" || v == "true"),
            ..Self::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        match self.level {
            Some(level) => EnvFilter::default().add_directive(LevelFilter::from_level(level).into()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }
}

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - GLYPH_TRACE_JSON: Enable JSON output (default: false)
///
/// `log` records from the registry and asset cache are forwarded into the
/// same subscriber. Calling this twice is harmless; the first subscriber wins.
pub fn init_tracing() {
    // Without a log file there is nothing to fail on
    let _ = init_tracing_with(&TracingOptions::from_env());
}

/// Initialize structured tracing from explicit options
///
/// Fails only when the log file cannot be opened. A subscriber that is
/// already installed is left in place.
pub fn init_tracing_with(options: &TracingOptions) -> Result<(), ConfigError> {
    let file = options.log_file.as_ref().map(LogFile::open).transpose()?;

    // JSON output for production/parsing
    let json_layer = options.json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_current_span(true)
            .with_span_list(true)
    });

    // Human-readable output for development
    let compact_layer = (!options.json).then(|| {
        fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::CLOSE)
            .compact()
    });

    // Plain copy for the log file, no ANSI escapes
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(Arc::new(file))
    });

    let installed = tracing_subscriber::registry()
        .with(options.env_filter())
        .with(json_layer)
        .with(compact_layer)
        .with(file_layer)
        .try_init();

    if installed.is_ok() {
        info!(
            json = options.json,
            level = ?options.level,
            log_file = ?options.log_file.as_ref().map(|file| &file.path),
            "Structured tracing initialized"
        );
    }
    Ok(())
}

/// Span covering one dispatch pass
#[inline]
pub fn span_pass(cadence: Cadence, pass: u64) -> Span {
    debug_span!("dispatch", cadence = %cadence, pass)
}
