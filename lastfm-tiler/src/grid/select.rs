//! Mapping ranked items onto grid cells.

use crate::provider::{ImageCandidate, RankedItem};
use crate::tile::CellAssignment;

/// Picks the image for one item: "extralarge" if offered, else "large",
/// else the first candidate in provider order.
///
/// Returns `None` when there are no candidates or the chosen one has an
/// empty URL (Last.fm does that for albums without art).
pub fn choose_image_url(candidates: &[ImageCandidate]) -> Option<&str> {
    let chosen = candidates
        .iter()
        .find(|c| c.size == "extralarge")
        .or_else(|| candidates.iter().find(|c| c.size == "large"))
        .or_else(|| candidates.first())?;

    let url = chosen.url.trim();
    (!url.is_empty()).then_some(url)
}

/// One assignment per cell, in rank order. Items past `total_cells` are
/// ignored; cells past the last item get no URL.
pub fn assign_cells(items: &[RankedItem], total_cells: usize) -> Vec<CellAssignment> {
    (0..total_cells)
        .map(|index| {
            let url = items
                .get(index)
                .and_then(|item| choose_image_url(&item.images))
                .map(str::to_string);
            CellAssignment::new(index, url)
        })
        .collect()
}
