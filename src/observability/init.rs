//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber to write structured logs to a
//! file in the data directory, keeping stdout free for command output.

use crate::Config;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based log output.
///
/// # Trace Level Resolution
///
/// Level is determined by:
/// 1. `RUST_LOG` environment variable if set
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # File Location
///
/// Logs are written to `foliovault.log` inside the data directory (see
/// [`crate::infrastructure::get_data_dir`]), appended across runs.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently fails if directory creation or file open fails (observability is
///   optional)
/// - Idempotent: safe to call multiple times (only first call takes effect)
pub fn init_tracing(config: &Config) {
    let level = std::env::var("RUST_LOG").ok().unwrap_or_else(|| {
        config
            .trace_level
            .clone()
            .unwrap_or_else(|| "info".to_string())
    });

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let Ok(log_file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("foliovault.log"))
    else {
        return;
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(log_file));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt_layer);

    let _ = subscriber.try_init();
}
