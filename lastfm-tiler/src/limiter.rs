//! Process-wide admission gate for tile work.
//!
//! Every tile of every grid performs one HTTP fetch followed by a resize.
//! Building several grids at once (one per user on the command line) would
//! otherwise multiply the number of simultaneous connections, so all tile
//! workers in the process draw from a single semaphore.
//!
//! The capacity comes from the `FMTILE_POOL_SIZE` environment variable, read
//! once when [`ConcurrencyLimiter::global`] is first called. Tests build
//! their own independent limiters with [`ConcurrencyLimiter::new`].
//!
//! ```ignore
//! use lastfm_tiler::limiter::ConcurrencyLimiter;
//!
//! let limiter = ConcurrencyLimiter::global();
//! let _permit = limiter.acquire().await;
//! // fetch + resize; the slot frees when `_permit` drops
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

/// Environment variable holding the maximum number of concurrent tile
/// operations (HTTP request + resize).
pub const POOL_SIZE_ENV: &str = "FMTILE_POOL_SIZE";

/// Capacity used when [`POOL_SIZE_ENV`] is unset or unusable.
pub const DEFAULT_POOL_SIZE: usize = 5;

static GLOBAL: OnceLock<Arc<ConcurrencyLimiter>> = OnceLock::new();

/// Parses a pool size setting. Missing, non-numeric and zero values fall
/// back to [`DEFAULT_POOL_SIZE`].
pub fn parse_pool_size(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&size| size > 0)
        .unwrap_or(DEFAULT_POOL_SIZE)
}

/// Reads [`POOL_SIZE_ENV`] from the process environment.
pub fn pool_size_from_env() -> usize {
    parse_pool_size(std::env::var(POOL_SIZE_ENV).ok().as_deref())
}

/// Semaphore-backed limiter with in-flight accounting.
///
/// Admission is FIFO (tokio's semaphore is fair), so no tile starves while
/// later ones overtake it.
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    max_permits: usize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ConcurrencyLimiter {
    /// Creates a limiter admitting at most `max_concurrent` operations.
    /// A capacity of zero would admit nothing and is raised to one.
    pub fn new(max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_permits: max_concurrent,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Creates a limiter sized from [`POOL_SIZE_ENV`].
    pub fn from_env() -> Self {
        Self::new(pool_size_from_env())
    }

    /// The limiter shared by every grid build in this process.
    ///
    /// Initialized from the environment on first call and never resized.
    pub fn global() -> Arc<ConcurrencyLimiter> {
        Arc::clone(GLOBAL.get_or_init(|| {
            let limiter = Self::from_env();
            debug!(
                capacity = limiter.max_concurrent(),
                "Initialized global tile limiter"
            );
            Arc::new(limiter)
        }))
    }

    /// Waits for a free slot. The slot is released when the permit drops,
    /// whichever path the holder exits through.
    pub async fn acquire(&self) -> ConcurrencyPermit<'_> {
        // The semaphore is owned here and never closed.
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("tile limiter semaphore closed");

        let current = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.update_peak(current);

        ConcurrencyPermit {
            _permit: permit,
            in_flight: &self.in_flight,
        }
    }

    fn update_peak(&self, current: usize) {
        self.peak_in_flight.fetch_max(current, Ordering::Relaxed);
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_permits
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Highest number of simultaneously admitted operations seen so far.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Relaxed)
    }

    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

/// One admission slot. Counts against the limiter until dropped.
pub struct ConcurrencyPermit<'a> {
    _permit: OwnedSemaphorePermit,
    in_flight: &'a AtomicUsize,
}

impl Drop for ConcurrencyPermit<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}
