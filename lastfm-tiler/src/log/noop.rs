//! Logger that drops everything.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Discards every line. Used when the caller disables diagnostics.
///
/// ```
/// use lastfm_tiler::log::{Logger, NoOpLogger};
/// use std::sync::Arc;
///
/// let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
/// logger.warn(format_args!("never printed"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
