//! Diagnostic logging seam for the grid engine.
//!
//! Tile failures are recoverable and never reach the caller of a grid build,
//! so the only trace they leave is a diagnostic line. Components that report
//! such conditions take an injected `Arc<dyn Logger>` instead of writing to
//! `tracing` directly, which lets a caller silence them or capture them.
//!
//! - [`Logger`]: the interface the engine logs through
//! - [`TracingLogger`]: forwards every line to the `tracing` crate
//! - [`NoOpLogger`]: discards everything, for quiet runs
//! - [`MemoryLogger`]: keeps lines in memory so tests can assert on them
//!
//! ```
//! use lastfm_tiler::log::{Logger, NoOpLogger};
//! use lastfm_tiler::log_warn;
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! log_warn!(logger, "tile {} fell back to a placeholder", 4);
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::MemoryLogger;
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
