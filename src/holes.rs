//! Finding the cells that a claim surrounds but doesn't include.

use crate::{
    cell::{Cell, CellSet},
    region::Region,
};

/// Returns every cell that `filled` covers but that isn't in `cells`.
///
/// Only the bounding box of `cells` is scanned, one cell at a time, so this
/// takes time proportional to its area. Each cell is tested at its center.
///
/// The hole cells come out in `(x, y)` order, one per unit square: adjacent
/// hole cells are not merged. A missing cell that reaches the outside through
/// a corner is part of a notch in `filled`, so it is never a hole.
pub fn hole_cells(filled: &Region, cells: &CellSet) -> Vec<Cell> {
    let Some(bounds) = cells.bounds() else {
        return Vec::new();
    };
    log::trace!("scanning {} cells for holes", bounds.area());

    let holes: Vec<Cell> = bounds
        .cells()
        .filter(|&c| !cells.contains(c) && filled.contains_cell(c))
        .collect();
    log::debug!("found {} hole cells", holes.len());
    holes
}
