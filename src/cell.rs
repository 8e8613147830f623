//! Grid cells, the input to everything else.

use std::collections::BTreeSet;

use crate::geom::{Point, Ring};

/// One unit square `[x, x + 1) × [y, y + 1)` on the integer lattice.
///
/// Cells order by `x` and then by `y`, which is also the order in which
/// hole cells are reported. They serialize as `[x, y]` pairs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Cell {
    /// The column, increasing to the east.
    pub x: i32,
    /// The row. Whether it increases up or down the map is up to the caller.
    pub y: i32,
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell { x, y }
    }
}

impl From<Cell> for (i32, i32) {
    fn from(c: Cell) -> Self {
        (c.x, c.y)
    }
}

impl Cell {
    /// The cell at column `x` and row `y`.
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// The boundary of this cell's unit square.
    ///
    /// The corners always come in the order `(x, y)`, `(x, y + 1)`,
    /// `(x + 1, y + 1)`, `(x + 1, y)`, which is clockwise when `y` points up.
    pub fn ring(self) -> Ring {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        Ring::new(vec![
            Point::new(x, y),
            Point::new(x, y + 1),
            Point::new(x + 1, y + 1),
            Point::new(x + 1, y),
        ])
    }

    /// The cell's center in doubled coordinates; see [`Ring::winding_number_doubled`].
    pub(crate) fn doubled_center(self) -> (i64, i64) {
        (2 * i64::from(self.x) + 1, 2 * i64::from(self.y) + 1)
    }
}

/// An inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CellBounds {
    /// The first column.
    pub min_x: i32,
    /// The first row.
    pub min_y: i32,
    /// The last column, included.
    pub max_x: i32,
    /// The last row, included.
    pub max_y: i32,
}

impl CellBounds {
    /// Is this cell inside the rectangle?
    pub fn contains(&self, cell: Cell) -> bool {
        (self.min_x..=self.max_x).contains(&cell.x) && (self.min_y..=self.max_y).contains(&cell.y)
    }

    /// The number of cells in this rectangle.
    pub fn area(&self) -> u64 {
        let width = u64::from(self.max_x.abs_diff(self.min_x)) + 1;
        let height = u64::from(self.max_y.abs_diff(self.min_y)) + 1;
        width * height
    }

    /// Iterates over all cells in this rectangle, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let ys = self.min_y..=self.max_y;
        (self.min_x..=self.max_x).flat_map(move |x| ys.clone().map(move |y| Cell::new(x, y)))
    }
}

/// A set of cells.
///
/// This is the input to the whole pipeline. It is built once and only read afterwards.
#[derive(Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CellSet {
    cells: BTreeSet<Cell>,
}

impl std::fmt::Debug for CellSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(&self.cells).finish()
    }
}

impl<C: Into<Cell>> FromIterator<C> for CellSet {
    fn from_iter<T: IntoIterator<Item = C>>(iter: T) -> Self {
        CellSet {
            cells: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<C: Into<Cell>> Extend<C> for CellSet {
    fn extend<T: IntoIterator<Item = C>>(&mut self, iter: T) {
        self.cells.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a CellSet {
    type Item = Cell;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, Cell>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}

impl CellSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell, returning false if it was already there.
    pub fn insert(&mut self, cell: impl Into<Cell>) -> bool {
        self.cells.insert(cell.into())
    }

    /// Is this cell in the set?
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// The number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if there are no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the cells in `(x, y)` order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// The boundary rings of all the cells, one per cell.
    pub fn rings(&self) -> impl Iterator<Item = Ring> + '_ {
        self.iter().map(Cell::ring)
    }

    /// The smallest rectangle of cells containing all of ours, or `None` if we're empty.
    pub fn bounds(&self) -> Option<CellBounds> {
        let first = self.cells.first()?;
        let last = self.cells.last()?;
        let (min_y, max_y) = self
            .cells
            .iter()
            .fold((first.y, first.y), |(lo, hi), c| (lo.min(c.y), hi.max(c.y)));
        Some(CellBounds {
            min_x: first.x,
            min_y,
            max_x: last.x,
            max_y,
        })
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for CellSet {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        crate::arbitrary::cell_set(16, u)
    }
}
