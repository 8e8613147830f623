//! The sweep-line implementation.
//!
//! All of our input edges are horizontal or vertical, with integer endpoints.
//! So instead of tracking intersections, we compress the plane into a grid:
//! the distinct `x` coordinates of the vertical edges split it into columns,
//! the distinct `y` coordinates of their endpoints split it into bands, and
//! inside each (column, band) cell the winding numbers are constant.
//!
//! The [`Sweeper`] moves up through the bands, keeping track of the vertical
//! edges that cross the current band, and reports the winding numbers of
//! every cell in it.

use crate::{
    segments::{Operand, SegIdx, Segments},
    topology::WindingNumber,
};

/// The winding numbers along one band of the sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepLine {
    /// Which band this is: it covers `ys[band]..ys[band + 1]`.
    pub band: usize,
    /// `windings[i]` is the winding number of the cell between `xs[i]` and `xs[i + 1]`.
    pub windings: Vec<WindingNumber>,
}

/// Sweeps a collection of segments from bottom to top.
#[derive(Debug)]
pub struct Sweeper<'a> {
    segments: &'a Segments,
    xs: Vec<i64>,
    ys: Vec<i64>,
    band: usize,
    next_enter: usize,
    next_exit: usize,
    /// The segments crossing the current band.
    active: Vec<SegIdx>,
}

impl<'a> Sweeper<'a> {
    /// Prepares to sweep over these segments, starting below the lowest band.
    pub fn new(segments: &'a Segments) -> Self {
        let xs = segments.xs();
        let ys = segments.ys();
        log::trace!(
            "sweeping {} segments over {} columns and {} bands",
            segments.len(),
            xs.len().saturating_sub(1),
            ys.len().saturating_sub(1)
        );
        Sweeper {
            segments,
            xs,
            ys,
            band: 0,
            next_enter: 0,
            next_exit: 0,
            active: Vec::new(),
        }
    }

    /// The column boundaries.
    pub fn xs(&self) -> &[i64] {
        &self.xs
    }

    /// The band boundaries.
    pub fn ys(&self) -> &[i64] {
        &self.ys
    }

    fn advance_to(&mut self, y: i64) {
        let enter = self.segments.entrances();
        while let Some(&(seg_y, seg)) = enter.get(self.next_enter) {
            if seg_y > y {
                break;
            }
            self.active.push(seg);
            self.next_enter += 1;
        }

        let exit = self.segments.exits();
        while let Some(&(seg_y, seg)) = exit.get(self.next_exit) {
            if seg_y > y {
                break;
            }
            if let Some(pos) = self.active.iter().position(|&s| s == seg) {
                self.active.swap_remove(pos);
            }
            self.next_exit += 1;
        }
    }
}

impl Iterator for Sweeper<'_> {
    type Item = SweepLine;

    fn next(&mut self) -> Option<SweepLine> {
        if self.band + 1 >= self.ys.len() {
            return None;
        }
        let y = self.ys[self.band];
        self.advance_to(y);

        // Every segment sits on a column boundary, so accumulate the changes at
        // each boundary and then sum them up from the left.
        let mut deltas = vec![WindingNumber::default(); self.xs.len()];
        for &seg in &self.active {
            debug_assert!(self.segments[seg].top > y);
            let Ok(col) = self.xs.binary_search(&self.segments[seg].x) else {
                continue;
            };
            let delta = self.segments.crossing_delta(seg);
            match self.segments.operand(seg) {
                Operand::A => deltas[col].shape_a += delta,
                Operand::B => deltas[col].shape_b += delta,
            }
        }

        let mut winding = WindingNumber::default();
        let windings = deltas
            .iter()
            .take(self.xs.len().saturating_sub(1))
            .map(|d| {
                winding.shape_a += d.shape_a;
                winding.shape_b += d.shape_b;
                winding
            })
            .collect();

        let band = self.band;
        self.band += 1;
        Some(SweepLine { band, windings })
    }
}

/// Runs the sweep to completion, collecting the winding numbers of every cell.
///
/// The result is indexed first by band and then by column.
pub fn sweep(segments: &Segments) -> Vec<Vec<WindingNumber>> {
    Sweeper::new(segments).map(|line| line.windings).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::tests::ring;

    fn w(shape_a: i32, shape_b: i32) -> WindingNumber {
        WindingNumber { shape_a, shape_b }
    }

    #[test]
    fn overlapping_squares() {
        let mut segs = Segments::default();
        segs.add_cycle(&ring(&[(0, 0), (2, 0), (2, 2), (0, 2)]), Operand::A)
            .unwrap();
        segs.add_cycle(&ring(&[(1, 1), (3, 1), (3, 3), (1, 3)]), Operand::B)
            .unwrap();

        let sweeper = Sweeper::new(&segs);
        assert_eq!(sweeper.xs(), &[0, 1, 2, 3]);
        assert_eq!(sweeper.ys(), &[0, 1, 2, 3]);

        let grid = sweep(&segs);
        assert_eq!(
            grid,
            vec![
                vec![w(1, 0), w(1, 0), w(0, 0)],
                vec![w(1, 0), w(1, 1), w(0, 1)],
                vec![w(0, 0), w(0, 1), w(0, 1)],
            ]
        );
    }

    #[test]
    fn clockwise_ring_winds_negatively() {
        let mut segs = Segments::default();
        segs.add_cycle(&ring(&[(0, 0), (0, 1), (1, 1), (1, 0)]), Operand::A)
            .unwrap();
        assert_eq!(sweep(&segs), vec![vec![w(-1, 0)]]);
    }

    #[test]
    fn square_with_hole() {
        let mut segs = Segments::default();
        segs.add_cycles(
            [
                ring(&[(0, 0), (3, 0), (3, 3), (0, 3)]),
                ring(&[(1, 1), (1, 2), (2, 2), (2, 1)]),
            ]
            .iter(),
            Operand::A,
        )
        .unwrap();
        let grid = sweep(&segs);
        assert_eq!(grid[1], vec![w(1, 0), w(0, 0), w(1, 0)]);
        assert!(grid[0].iter().chain(&grid[2]).all(|&x| x == w(1, 0)));
    }

    #[test]
    fn empty() {
        assert!(sweep(&Segments::default()).is_empty());
    }
}
