//! Grid engine: geometry, cell selection, assembly and the build entry point.
//!
//! ```text
//! TilerConfig ─► GridBuilder::build
//!                  ├─ ChartProvider::top_albums   (one request per grid)
//!                  ├─ assign_cells                (size preference, padding)
//!                  └─ GridAssembler::assemble
//!                       ├─ TileWorker × N         (bounded by the limiter)
//!                       └─ mpsc fan-in ─► canvas  (placed by cell index)
//! ```

mod assembler;
mod builder;
mod select;
mod spec;

pub use assembler::GridAssembler;
pub use builder::{GridBuilder, GridError, LastFmGridBuilder};
pub use select::{assign_cells, choose_image_url};
pub use spec::GridSpec;
