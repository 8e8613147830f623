//! An arena of vertical edges, which is all the sweep-line needs to see.

use crate::{geom::Ring, Error};

/// An index into our segment arena.
///
/// This index is used to identify a segment, whose data can be retrieved by looking
/// it up in [`Segments`]. (Of course, this index-as-identifier breaks down if there are
/// multiple `Segments` in flight. Just be careful not to mix them up.)
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SegIdx(pub usize);

impl std::fmt::Debug for SegIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s_{}", self.0)
    }
}

/// Which operand of a binary operation a segment belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Operand {
    /// The first operand, or the only one.
    A,
    /// The second operand.
    B,
}

/// A vertical segment, in sweep-line order (`top.y > bottom.y`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// The horizontal position of the segment.
    pub x: i64,
    /// The lower endpoint's height.
    pub bottom: i64,
    /// The upper endpoint's height.
    pub top: i64,
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x={} [{}, {}]", self.x, self.bottom, self.top)
    }
}

/// An arena of the vertical edges of some rectilinear rings.
///
/// Horizontal edges carry no winding information, so they aren't stored: every
/// vertex of a rectilinear ring is also the endpoint of one of its vertical
/// edges, so nothing is lost.
#[derive(Debug, Clone, Default)]
pub struct Segments {
    segs: Vec<Segment>,
    /// For each segment, true if its original contour traversed it upwards.
    upwards: Vec<bool>,
    operand: Vec<Operand>,

    /// All the entrance heights of segments, ordered by height.
    enter: Vec<(i64, SegIdx)>,
    /// All the exit heights of segments, ordered by height.
    exit: Vec<(i64, SegIdx)>,
}

impl Segments {
    /// The number of segments in this arena.
    pub fn len(&self) -> usize {
        self.segs.len()
    }

    /// Returns `true` if this arena has no segments.
    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    /// Iterate over all indices that can be used to index into this arena.
    pub fn indices(&self) -> impl Iterator<Item = SegIdx> {
        (0..self.segs.len()).map(SegIdx)
    }

    /// Iterate over all segments in this arena.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segs.iter()
    }

    /// Which operand this segment came from.
    pub fn operand(&self, idx: SegIdx) -> Operand {
        self.operand[idx.0]
    }

    /// How much the winding number changes when crossing this segment from left to right.
    ///
    /// A counter-clockwise ring goes down its left side and up its right side,
    /// so it winds once around the points between them.
    pub fn crossing_delta(&self, idx: SegIdx) -> i32 {
        if self.upwards[idx.0] {
            -1
        } else {
            1
        }
    }

    /// Add a collection of closed rings to this arena.
    ///
    /// This is faster than calling `add_cycle` repeatedly.
    pub fn add_cycles<'a>(
        &mut self,
        rings: impl IntoIterator<Item = &'a Ring>,
        operand: Operand,
    ) -> Result<(), Error> {
        let old_len = self.segs.len();
        for ring in rings {
            self.add_cycle_without_updating_enter_exit(ring, operand)?;
        }
        self.update_enter_exit(old_len);
        Ok(())
    }

    /// Add a closed ring to this arena.
    pub fn add_cycle(&mut self, ring: &Ring, operand: Operand) -> Result<(), Error> {
        self.add_cycles(std::iter::once(ring), operand)
    }

    fn add_cycle_without_updating_enter_exit(
        &mut self,
        ring: &Ring,
        operand: Operand,
    ) -> Result<(), Error> {
        ring.check_rectilinear()?;
        for (p, q) in ring.edges() {
            if p.x != q.x || p.y == q.y {
                continue;
            }
            let (bottom, top, up) = if p.y < q.y {
                (p.y, q.y, true)
            } else {
                (q.y, p.y, false)
            };
            self.segs.push(Segment {
                x: p.x,
                bottom,
                top,
            });
            self.upwards.push(up);
            self.operand.push(operand);
        }
        Ok(())
    }

    fn update_enter_exit(&mut self, old_len: usize) {
        for idx in old_len..self.len() {
            let seg_idx = SegIdx(idx);
            let seg = &self.segs[seg_idx.0];

            self.enter.push((seg.bottom, seg_idx));
            self.exit.push((seg.top, seg_idx));
        }

        // We sort the enter segments by height, and then by horizontal
        // position so that they're likely to arrive in sweep-line order.
        self.enter.sort_by_key(|&(y, seg)| (y, self.segs[seg.0].x));
        self.exit.sort_by_key(|&(y, _)| y);
    }

    /// All the entrance heights of segments, ordered by height.
    pub fn entrances(&self) -> &[(i64, SegIdx)] {
        &self.enter
    }

    /// All the exit heights of segments, ordered by height.
    pub fn exits(&self) -> &[(i64, SegIdx)] {
        &self.exit
    }

    /// All the distinct horizontal coordinates of segments, in increasing order.
    pub fn xs(&self) -> Vec<i64> {
        let mut xs: Vec<_> = self.segs.iter().map(|s| s.x).collect();
        xs.sort_unstable();
        xs.dedup();
        xs
    }

    /// All the distinct vertical coordinates of segment endpoints, in increasing order.
    pub fn ys(&self) -> Vec<i64> {
        let mut ys: Vec<_> = self.segs.iter().flat_map(|s| [s.bottom, s.top]).collect();
        ys.sort_unstable();
        ys.dedup();
        ys
    }

}

impl std::ops::Index<SegIdx> for Segments {
    type Output = Segment;

    fn index(&self, index: SegIdx) -> &Self::Output {
        &self.segs[index.0]
    }
}
