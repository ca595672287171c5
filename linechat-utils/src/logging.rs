//! Logging infrastructure for linechat
//!
//! Provides unified logging setup using the tracing ecosystem.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::{paths, LinechatError, Result};

/// Environment variable holding the tracing filter
pub const LOG_ENV_VAR: &str = "LINECHAT_LOG";

/// Log file created under the log directory
pub const LOG_FILE_NAME: &str = "linechat.log";

/// Log output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Log to stderr (interleaves with the chat, development only)
    Stderr,
    /// Log to file (the terminal belongs to the chat)
    File,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output destination
    pub output: LogOutput,
    /// Log level filter (e.g., "info", "debug", "linechat_client=debug")
    pub filter: String,
    /// Include span events (enter/exit)
    pub span_events: bool,
    /// Include file/line in logs
    pub file_line: bool,
}

impl LogConfig {
    /// Create config for the chat client with a fallback filter
    ///
    /// `LINECHAT_LOG` still takes precedence over `default`.
    pub fn client_with_default(default: &str) -> Self {
        Self {
            output: LogOutput::File,
            filter: resolve_filter(std::env::var(LOG_ENV_VAR).ok(), default),
            span_events: false,
            file_line: false,
        }
    }

    /// Create config for development (verbose stderr)
    pub fn development() -> Self {
        Self {
            output: LogOutput::Stderr,
            filter: "debug".into(),
            span_events: true,
            file_line: true,
        }
    }
}

fn resolve_filter(from_env: Option<String>, default: &str) -> String {
    match from_env {
        Some(filter) if !filter.trim().is_empty() => filter,
        _ => default.to_string(),
    }
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| LinechatError::config(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    let fmt_layer = if config.span_events {
        fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    } else {
        fmt_layer
    };

    let fmt_layer = if config.file_line {
        fmt_layer.with_file(true).with_line_number(true)
    } else {
        fmt_layer.with_file(false).with_line_number(false)
    };

    match config.output {
        LogOutput::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer.with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| LinechatError::internal(format!("Failed to init logging: {}", e)))?;
        }
        LogOutput::File => {
            let log_dir = paths::log_dir();
            std::fs::create_dir_all(&log_dir).map_err(|e| LinechatError::FileWrite {
                path: log_dir.clone(),
                source: e,
            })?;

            let log_path = log_dir.join(LOG_FILE_NAME);
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .map_err(|e| LinechatError::FileWrite {
                    path: log_path.clone(),
                    source: e,
                })?;

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer.with_writer(file).with_ansi(false))
                .try_init()
                .map_err(|e| LinechatError::internal(format!("Failed to init logging: {}", e)))?;

            tracing::debug!(path = %log_path.display(), "logging to file");
        }
    }

    tracing::debug!(filter = %config.filter, "logging initialized");
    Ok(())
}
