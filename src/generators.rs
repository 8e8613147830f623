//! Utilities for generating examples, benchmarks, and test cases.

use crate::{Cell, CellSet};

/// A small claim with one enclosed hole and a notch that opens to the outside.
///
/// ```text
/// y=6  #
/// y=5  #
/// y=4  # # #
/// y=3  # . #
/// y=2  # # #
/// y=1  # # #
/// y=0  # # #
/// ```
///
/// The `.` at `(1, 3)` is the hole.
pub fn claim_example() -> CellSet {
    let mut ret: CellSet = (0..7).map(|y| (0, y)).collect();
    ret.extend([(1, 0), (1, 1), (1, 2), (1, 4)]);
    ret.extend((0..5).map(|y| (2, y)));
    ret
}

/// The border of an `n` by `n` square, enclosing `(n - 2)²` hole cells.
pub fn hollow_square(n: i32) -> CellSet {
    let last = n - 1;
    (0..n)
        .flat_map(|x| (0..n).map(move |y| (x, y)))
        .filter(|&(x, y)| x == 0 || y == 0 || x == last || y == last)
        .collect()
}

/// Nested hollow squares, each one two cells inside the last.
///
/// Every other ring of cells is missing, so filling this pattern has to
/// get past several levels of nesting.
pub fn concentric(rings: i32) -> CellSet {
    let n = 4 * rings - 1;
    (0..n)
        .flat_map(|x| (0..n).map(move |y| (x, y)))
        .filter(|&(x, y)| {
            let depth = x.min(y).min(n - 1 - x).min(n - 1 - y);
            depth % 2 == 0
        })
        .collect()
}

/// An `n` by `n` checkerboard: no two cells share an edge, and lots of them share corners.
pub fn checkerboard(n: i32) -> CellSet {
    (0..n)
        .flat_map(|x| (0..n).map(move |y| (x, y)))
        .filter(|&(x, y)| (x + y) % 2 == 0)
        .collect()
}

/// A grid of `n` by `n` separate claims, each of them a hollow 3 by 3 square.
pub fn islands(n: i32) -> CellSet {
    let island = hollow_square(3);
    let mut ret = CellSet::new();
    for i in 0..n {
        for j in 0..n {
            ret.extend(
                island
                    .iter()
                    .map(|c| Cell::new(c.x + 4 * i, c.y + 4 * j)),
            );
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{outline, Multiplicity, Options};

    fn hole_count(cells: &CellSet) -> usize {
        outline(cells, &Options::with_scale(1)).unwrap().holes.len()
    }

    #[test]
    fn claim_example_has_one_hole() {
        assert_eq!(claim_example().len(), 16);
        assert_eq!(hole_count(&claim_example()), 1);
    }

    #[test]
    fn hollow_squares() {
        assert_eq!(hole_count(&hollow_square(2)), 0);
        assert_eq!(hole_count(&hollow_square(5)), 9);
    }

    #[test]
    fn checkerboard_is_all_corners() {
        let out = outline(&checkerboard(4), &Options::default()).unwrap();
        assert_eq!(out.multiplicity(), Multiplicity::Multiple(8));
        assert!(out.holes.is_empty());
    }

    #[test]
    fn islands_stay_separate() {
        let out = outline(&islands(3), &Options::default()).unwrap();
        assert_eq!(out.multiplicity(), Multiplicity::Multiple(9));
        assert_eq!(out.holes.len(), 9);
    }

    #[test]
    fn concentric_rings_fill_completely() {
        let cells = concentric(3);
        let out = outline(&cells, &Options::with_scale(1)).unwrap();
        assert_eq!(out.multiplicity(), Multiplicity::Single);
        assert_eq!(cells.len() + out.holes.len(), 11 * 11);
    }
}
