//! Fan-out/fan-in compositing of tiles onto one canvas.
//!
//! One tokio task is spawned per cell. Each task sends its [`TileResult`]
//! down a shared mpsc channel as soon as it is done, so results arrive in
//! network order, not grid order. Placement is driven only by the index a
//! result carries, which makes the output independent of arrival order.

use super::GridSpec;
use crate::limiter::ConcurrencyLimiter;
use crate::log::Logger;
use crate::tile::{CellAssignment, ImageFetcher, TileResult, TileSource, TileWorker};
use crate::{log_error, log_info, log_warn};
use image::{imageops, RgbaImage};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Spawns tile workers for a grid and stitches their output together.
pub struct GridAssembler<F: ImageFetcher> {
    fetcher: Arc<F>,
    limiter: Arc<ConcurrencyLimiter>,
    logger: Arc<dyn Logger>,
}

impl<F: ImageFetcher> Clone for GridAssembler<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            limiter: Arc::clone(&self.limiter),
            logger: Arc::clone(&self.logger),
        }
    }
}

impl<F: ImageFetcher> GridAssembler<F> {
    /// `limiter` is usually [`ConcurrencyLimiter::global`], shared with
    /// every other assembler in the process.
    pub fn new(fetcher: Arc<F>, limiter: Arc<ConcurrencyLimiter>, logger: Arc<dyn Logger>) -> Self {
        Self {
            fetcher,
            limiter,
            logger,
        }
    }

    /// Builds the canvas for `spec` from `assignments`.
    ///
    /// Returns only once every spawned tile has reported. Cells without an
    /// assignment, and cells whose worker died, stay fully transparent.
    pub async fn assemble(&self, spec: GridSpec, assignments: Vec<CellAssignment>) -> RgbaImage {
        let canvas_side = spec.canvas_side_px();
        let mut canvas = RgbaImage::new(canvas_side, canvas_side);

        let worker = TileWorker::new(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.limiter),
            Arc::clone(&self.logger),
            spec.cell_size_px(),
        );

        // Sized so no worker ever waits on a full channel.
        let (tx, mut rx) = mpsc::channel::<TileResult>(assignments.len().max(1));
        let mut pending = vec![false; spec.total_cells()];
        let mut expected = 0usize;

        for assignment in assignments {
            match pending.get_mut(assignment.index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    log_warn!(self.logger, "Duplicate assignment for tile {}, ignoring", assignment.index);
                    continue;
                }
                None => {
                    log_warn!(
                        self.logger,
                        "Assignment index {} outside {}-cell grid, ignoring",
                        assignment.index,
                        spec.total_cells()
                    );
                    continue;
                }
            }
            expected += 1;

            let worker = worker.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let tile = worker.produce(assignment).await;
                // Fails only if the assembler stopped listening.
                let _ = tx.send(tile).await;
            });
        }
        // Only worker clones remain, so the channel closes if they all die.
        drop(tx);

        let mut placed = 0usize;
        let mut placeholders = 0usize;

        while placed < expected {
            let Some(tile) = rx.recv().await else {
                let missing: Vec<usize> = pending
                    .iter()
                    .enumerate()
                    .filter_map(|(i, waiting)| waiting.then_some(i))
                    .collect();
                log_error!(
                    self.logger,
                    "{} tile worker(s) exited without reporting, leaving cells {:?} empty",
                    missing.len(),
                    missing
                );
                break;
            };

            let Some((x, y)) = spec.cell_origin(tile.index) else {
                continue;
            };
            imageops::replace(&mut canvas, &tile.raster, i64::from(x), i64::from(y));

            if let Some(slot) = pending.get_mut(tile.index) {
                *slot = false;
            }
            if tile.source != TileSource::Fetched {
                placeholders += 1;
            }
            placed += 1;
        }

        log_info!(
            self.logger,
            "Assembled {}x{} grid ({}px): {} tiles placed, {} placeholders",
            spec.side_cells(),
            spec.side_cells(),
            canvas_side,
            placed,
            placeholders
        );

        canvas
    }
}
