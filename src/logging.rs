//! Logging setup on tracing + tracing-subscriber
//!
//! Console logs go to stderr so command output on stdout stays parseable.
//! An optional rolling file layer is added when `logging.file` is set.
//! `RUST_LOG` may refine the filter per module.

use std::fs;
use std::io;
use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::LoggingSettings;
use crate::error::{Error, Result};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Keeps the non-blocking file writer alive; dropping it flushes the file.
pub struct LogGuards {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// `-q` forces errors only. `-v` lifts the level to at least info, `-vv` to
/// debug and `-vvv` to trace.
pub fn init_logging(settings: &LoggingSettings, verbose: u8, quiet: bool) -> Result<LogGuards> {
    let level = determine_level(settings, verbose, quiet);
    let filter = build_env_filter(level)?;
    let console = console_layer(settings.json_format);

    let (file_layer, file_guard) = match settings.file.as_deref() {
        Some(path) => {
            let (layer, guard) = build_file_layer(
                Path::new(path),
                settings.max_file_size_mb,
                settings.max_files,
                settings.json_format,
            )?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Internal(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(level = %level, file = ?settings.file, "Logging initialized");

    Ok(LogGuards {
        _file_guard: file_guard,
    })
}

fn determine_level(settings: &LoggingSettings, verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    let configured = parse_level(&settings.level);
    match verbose {
        0 => configured,
        1 => configured.max(Level::INFO),
        2 => configured.max(Level::DEBUG),
        _ => Level::TRACE,
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn build_env_filter(level: Level) -> Result<EnvFilter> {
    let crate_directive: Directive = format!("dirs_engine={}", level)
        .to_lowercase()
        .parse()
        .map_err(|e| Error::Internal(format!("Invalid log directive: {}", e)))?;

    let base = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    Ok(base.add_directive(crate_directive))
}

fn console_layer<S>(json_format: bool) -> BoxedLayer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    if json_format {
        Box::new(
            fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_target(true),
        )
    } else {
        Box::new(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
    }
}

fn build_file_layer<S>(
    path: &Path,
    max_size_mb: u64,
    max_files: u32,
    json_format: bool,
) -> Result<(BoxedLayer<S>, WorkerGuard)>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory).map_err(|e| Error::IoWrite {
        path: directory.to_path_buf(),
        source: e,
    })?;

    let prefix = path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("dirs-engine");

    // tracing-appender rotates by time only; small size limits rotate hourly
    let rotation = if max_size_mb > 0 && max_size_mb < 10 {
        Rotation::HOURLY
    } else {
        Rotation::DAILY
    };

    let appender = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(max_files.max(1) as usize)
        .build(directory)
        .map_err(|e| Error::Config(format!("Failed to create log file appender: {}", e)))?;

    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer: BoxedLayer<S> = if json_format {
        Box::new(fmt::layer().json().with_writer(writer).with_ansi(false))
    } else {
        Box::new(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
    };

    Ok((layer, guard))
}

/// Minimal stderr logging for tests and tools.
pub fn init_simple(level: Level) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(level.to_string().to_lowercase()))
        .with(fmt::layer().with_writer(io::stderr).compact())
        .try_init()
        .map_err(|e| Error::Internal(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("warning"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("nonsense"), Level::WARN);
    }

    #[test]
    fn test_quiet_wins() {
        let settings = LoggingSettings::default();
        assert_eq!(determine_level(&settings, 3, true), Level::ERROR);
    }

    #[test]
    fn test_verbose_raises_level() {
        let settings = LoggingSettings::default();
        assert_eq!(determine_level(&settings, 0, false), Level::WARN);
        assert_eq!(determine_level(&settings, 1, false), Level::INFO);
        assert_eq!(determine_level(&settings, 2, false), Level::DEBUG);
        assert_eq!(determine_level(&settings, 3, false), Level::TRACE);
    }

    #[test]
    fn test_verbose_never_lowers_configured_level() {
        let settings = LoggingSettings {
            level: "trace".into(),
            ..Default::default()
        };
        assert_eq!(determine_level(&settings, 1, false), Level::TRACE);
    }

    #[test]
    fn test_build_env_filter() {
        assert!(build_env_filter(Level::DEBUG).is_ok());
    }

    #[test]
    fn test_file_layer_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let log_path = tmp.path().join("logs").join("dirs.log");

        let result = build_file_layer::<tracing_subscriber::Registry>(&log_path, 10, 3, false);
        assert!(result.is_ok());
        assert!(tmp.path().join("logs").exists());
    }
}
