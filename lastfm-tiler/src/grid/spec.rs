//! Grid geometry.

/// Shape of a square grid: `side_cells`×`side_cells` tiles of
/// `cell_size_px`×`cell_size_px` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpec {
    side_cells: u32,
    cell_size_px: u32,
}

impl GridSpec {
    /// Both dimensions are clamped to at least 1.
    pub fn new(side_cells: u32, cell_size_px: u32) -> Self {
        Self {
            side_cells: side_cells.max(1),
            cell_size_px: cell_size_px.max(1),
        }
    }

    pub fn side_cells(&self) -> u32 {
        self.side_cells
    }

    pub fn cell_size_px(&self) -> u32 {
        self.cell_size_px
    }

    pub fn total_cells(&self) -> usize {
        self.side_cells as usize * self.side_cells as usize
    }

    /// Side of the assembled canvas in pixels, saturating at `u32::MAX`.
    ///
    /// Configurations reaching this point through
    /// [`TilerConfig::validate`](crate::config::TilerConfig::validate) never
    /// saturate.
    pub fn canvas_side_px(&self) -> u32 {
        self.side_cells.saturating_mul(self.cell_size_px)
    }

    /// Top-left pixel of cell `index` (row-major), or `None` outside the grid.
    pub fn cell_origin(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.total_cells() {
            return None;
        }
        let side = self.side_cells as usize;
        let row = (index / side) as u32;
        let col = (index % side) as u32;
        Some((
            col.saturating_mul(self.cell_size_px),
            row.saturating_mul(self.cell_size_px),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_sizes() {
        let spec = GridSpec::new(3, 174);
        assert_eq!(spec.total_cells(), 9);
        assert_eq!(spec.canvas_side_px(), 522);
    }

    #[test]
    fn test_zero_clamped() {
        let spec = GridSpec::new(0, 0);
        assert_eq!(spec.side_cells(), 1);
        assert_eq!(spec.cell_size_px(), 1);
    }

    #[test]
    fn test_huge_spec_saturates() {
        let spec = GridSpec::new(70_000, 70_000);
        assert_eq!(spec.canvas_side_px(), u32::MAX);
        assert_eq!(spec.cell_origin(1), Some((70_000, 0)));
    }

    #[test]
    fn test_cell_origin_row_major() {
        let spec = GridSpec::new(3, 10);
        assert_eq!(spec.cell_origin(0), Some((0, 0)));
        assert_eq!(spec.cell_origin(2), Some((20, 0)));
        assert_eq!(spec.cell_origin(3), Some((0, 10)));
        assert_eq!(spec.cell_origin(5), Some((20, 10)));
        assert_eq!(spec.cell_origin(8), Some((20, 20)));
        assert_eq!(spec.cell_origin(9), None);
    }

    #[test]
    fn test_every_index_has_distinct_origin() {
        let spec = GridSpec::new(4, 7);
        let mut origins: Vec<_> = (0..spec.total_cells())
            .map(|i| spec.cell_origin(i).unwrap())
            .collect();
        origins.sort();
        origins.dedup();
        assert_eq!(origins.len(), 16);
    }
}
