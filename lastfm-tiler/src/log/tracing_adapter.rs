//! `tracing` backend for [`Logger`].

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Forwards engine diagnostics to the `tracing` crate.
///
/// Lines are emitted under the `lastfm_tiler::grid` target so they can be
/// filtered separately with `RUST_LOG`. A subscriber must already be
/// installed (see [`crate::logging::init_logging`]), otherwise the lines go
/// nowhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "lastfm_tiler::grid", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "lastfm_tiler::grid", "{}", args),
            LogLevel::Info => tracing::info!(target: "lastfm_tiler::grid", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "lastfm_tiler::grid", "{}", args),
            LogLevel::Error => tracing::error!(target: "lastfm_tiler::grid", "{}", args),
        }
    }
}
