//! Logging system initialization and configuration
//!
//! Structured logging through `tracing`:
//! - `VST_LOG` replaces the configured filter when set
//! - Pretty, compact or JSON console output
//! - Optional non-blocking file output with daily rotation
//!
//! The frame loop runs inside a `frame_loop` span and each frame in a
//! `frame` span, so console lines carry that context and the file log
//! records how long a run took when its span closes.

use std::path::PathBuf;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Environment variable that overrides the configured filter
pub const LOG_ENV_VAR: &str = "VST_LOG";

/// File name prefix of the rolling log
const LOG_FILE_PREFIX: &str = "vst-postprocess.log";

/// Runtime logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    pub format: LogFormat,
    pub timestamps: bool,
    /// Show source file and line of each event
    pub file_line: bool,
    pub file_output: bool,
    /// Directory for the rolling log; platform data dir when unset
    pub file_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
            timestamps: true,
            file_line: false,
            file_output: false,
            file_path: None,
        }
    }
}

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl LogFormat {
    /// Parse a format name as written in the config file
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }
}

/// Parse a level name (`trace` .. `error`, case-insensitive)
pub fn parse_level(s: &str) -> Option<Level> {
    s.trim().parse::<Level>().ok()
}

/// Filter directive for this crate at `level`
pub fn default_directive(level: Level) -> String {
    format!("vst_postprocess={}", level.as_str().to_lowercase())
}

/// Pick the filter directive: a non-blank `VST_LOG` value wins over the
/// configured level.
pub fn filter_directive(level: Level, env_value: Option<&str>) -> String {
    match env_value.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ => default_directive(level),
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vst-postprocess")
        .join("logs")
}

/// Box `$layer`, dropping the timer unless `$timestamps` is set
macro_rules! boxed_with_timer {
    ($layer:expr, $timestamps:expr) => {{
        let layer = $layer;
        if $timestamps {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    }};
}

fn console_layer<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let base = fmt::layer()
        .with_target(true)
        .with_file(config.file_line)
        .with_line_number(config.file_line);

    match config.format {
        LogFormat::Json => boxed_with_timer!(
            base.json().with_current_span(true).with_span_list(false),
            config.timestamps
        ),
        LogFormat::Compact => boxed_with_timer!(base.compact(), config.timestamps),
        LogFormat::Pretty => boxed_with_timer!(base, config.timestamps),
    }
}

/// Install the global subscriber.
///
/// Returns the guard of the background file writer when file output is
/// enabled; keep it alive until exit so buffered lines get flushed.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let directive = filter_directive(config.level, env_value.as_deref());
    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Warning: ignoring invalid {LOG_ENV_VAR} '{directive}': {e}");
        EnvFilter::new(default_directive(config.level))
    });

    let mut guard = None;
    let file_layer = config.file_output.then(|| {
        let log_dir = config.file_path.clone().unwrap_or_else(default_log_dir);
        std::fs::create_dir_all(&log_dir)
            .map(|()| {
                let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);
                let (writer, worker) = tracing_appender::non_blocking(appender);
                guard = Some(worker);
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
            })
            .map_err(|e| eprintln!("Warning: no log file, cannot create {log_dir:?}: {e}"))
            .ok()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer(config))
        .with(file_layer.flatten())
        .init();

    tracing::debug!(
        %directive,
        format = ?config.format,
        file_output = guard.is_some(),
        "Logging initialized"
    );

    guard
}
