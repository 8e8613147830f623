//! Utilities for computing topological properties of rectilinear rings.
//!
//! This consumes the output of the sweep-line algorithm and does things
//! like winding number computations and boolean operations.

use std::collections::HashMap;

use crate::{
    geom::{Point, Ring},
    segments::{Operand, Segments},
    sweep::Sweeper,
    Error,
};

/// We support boolean operations, so a "winding number" for us is two winding
/// numbers, one for each shape.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Default, serde::Serialize)]
pub struct WindingNumber {
    /// The winding number of the first shape.
    pub shape_a: i32,
    /// The winding number of the second shape.
    pub shape_b: i32,
}

impl std::fmt::Debug for WindingNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}a + {}b", self.shape_a, self.shape_b)
    }
}

/// The four directions an output edge can point in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Dir {
    East,
    North,
    West,
    South,
}

impl Dir {
    /// The direction you face after turning left.
    fn left(self) -> Dir {
        match self {
            Dir::East => Dir::North,
            Dir::North => Dir::West,
            Dir::West => Dir::South,
            Dir::South => Dir::East,
        }
    }
}

/// A vertex of the compressed grid: a column boundary and a band boundary.
type GridVertex = (usize, usize);

/// A unit-length (in compressed coordinates) piece of the output boundary.
///
/// The "inside" part of the output set is always on its left.
#[derive(Clone, Copy, Debug)]
struct BoundaryEdge {
    from: GridVertex,
    to: GridVertex,
    dir: Dir,
}

/// Consumes sweep-line output and computes topology.
///
/// The sweep divides the plane into a grid of cells (not to be confused with
/// the unit [`Cell`](crate::Cell)s of the input, although for unit squares
/// they often coincide) with constant winding numbers. A boolean operation
/// decides which of those cells are inside, and the boundary between the
/// inside cells and the rest is traced into [`Contours`].
#[derive(Clone, Debug)]
pub struct Topology {
    xs: Vec<i64>,
    ys: Vec<i64>,
    /// Indexed by band and then by column.
    winding: Vec<Vec<WindingNumber>>,
}

impl Topology {
    /// Builds the topology of two collections of rectilinear rings.
    ///
    /// Each ring counts positively if it winds counter-clockwise and
    /// negatively otherwise; callers that want a different convention should
    /// orient their rings first.
    pub fn from_rings<'a, 'b>(
        set_a: impl IntoIterator<Item = &'a Ring>,
        set_b: impl IntoIterator<Item = &'b Ring>,
    ) -> Result<Self, Error> {
        let mut segments = Segments::default();
        segments.add_cycles(set_a, Operand::A)?;
        segments.add_cycles(set_b, Operand::B)?;
        Ok(Self::from_segments(&segments))
    }

    /// Sweeps an arena of segments and records the winding numbers it finds.
    pub fn from_segments(segments: &Segments) -> Self {
        let mut sweeper = Sweeper::new(segments);
        let xs = sweeper.xs().to_vec();
        let ys = sweeper.ys().to_vec();
        let winding = sweeper.by_ref().map(|line| line.windings).collect();
        Topology { xs, ys, winding }
    }

    /// The number of columns in the compressed grid.
    pub fn columns(&self) -> usize {
        self.xs.len().saturating_sub(1)
    }

    /// The number of bands in the compressed grid.
    pub fn bands(&self) -> usize {
        self.ys.len().saturating_sub(1)
    }

    /// The winding number of the grid cell at this column and band.
    ///
    /// Everything outside the grid has winding number zero.
    pub fn winding(&self, column: isize, band: isize) -> WindingNumber {
        usize::try_from(band)
            .ok()
            .and_then(|b| self.winding.get(b))
            .zip(usize::try_from(column).ok())
            .and_then(|(row, c)| row.get(c))
            .copied()
            .unwrap_or_default()
    }

    fn point(&self, (col, band): GridVertex) -> Point {
        Point::new(self.xs[col], self.ys[band])
    }

    fn boundary_edges(&self, inside: &impl Fn(WindingNumber) -> bool) -> Vec<BoundaryEdge> {
        let is_in = |c: isize, b: isize| inside(self.winding(c, b));
        let mut edges = Vec::new();
        for band in 0..self.bands() {
            for col in 0..self.columns() {
                let (c, b) = (col as isize, band as isize);
                if !is_in(c, b) {
                    continue;
                }
                // Walk counter-clockwise around the cell, keeping the inside on the left.
                if !is_in(c, b - 1) {
                    edges.push(BoundaryEdge {
                        from: (col, band),
                        to: (col + 1, band),
                        dir: Dir::East,
                    });
                }
                if !is_in(c + 1, b) {
                    edges.push(BoundaryEdge {
                        from: (col + 1, band),
                        to: (col + 1, band + 1),
                        dir: Dir::North,
                    });
                }
                if !is_in(c, b + 1) {
                    edges.push(BoundaryEdge {
                        from: (col + 1, band + 1),
                        to: (col, band + 1),
                        dir: Dir::West,
                    });
                }
                if !is_in(c - 1, b) {
                    edges.push(BoundaryEdge {
                        from: (col, band + 1),
                        to: (col, band),
                        dir: Dir::South,
                    });
                }
            }
        }
        edges
    }

    /// Returns the boundary of the set of points whose winding number satisfies `inside`.
    ///
    /// When two parts of the set touch only at a corner, they get separate
    /// contours. A contour can still pass through the same corner twice: a
    /// notch that reaches the outside through a corner stays part of the outer
    /// contour, and holes that touch each other at a corner share one contour.
    pub fn contours(&self, inside: impl Fn(WindingNumber) -> bool) -> Contours {
        let edges = self.boundary_edges(&inside);
        let mut outgoing: HashMap<GridVertex, Vec<usize>> = HashMap::new();
        for (idx, e) in edges.iter().enumerate() {
            outgoing.entry(e.from).or_default().push(idx);
        }

        // At most vertices there's only one way to continue. Where two parts of
        // the set meet at a corner there are two, and turning left keeps us
        // going around the same inside cell.
        let next_edge = |idx: usize| -> usize {
            let e = &edges[idx];
            let candidates = &outgoing[&e.to];
            candidates
                .iter()
                .copied()
                .find(|&c| candidates.len() == 1 || edges[c].dir == e.dir.left())
                .unwrap_or(candidates[0])
        };

        let mut visited = vec![false; edges.len()];
        let mut loops: Vec<Vec<usize>> = Vec::new();
        for start in 0..edges.len() {
            if visited[start] {
                continue;
            }

            let mut segs: Vec<usize> = Vec::new();
            let mut cur = start;
            loop {
                visited[cur] = true;
                segs.push(cur);
                cur = next_edge(cur);
                // Following the boundary is a permutation of the edges, so the
                // first edge we see twice is the one we started with.
                if visited[cur] {
                    break;
                }
            }
            loops.push(segs);
        }

        let mut contours: Vec<Contour> = loops
            .iter()
            .filter_map(|segs| self.make_contour(&edges, segs))
            .collect();
        contours.sort_by(|c1, c2| {
            (c1.points.first(), !c1.outer, &c1.points).cmp(&(
                c2.points.first(),
                !c2.outer,
                &c2.points,
            ))
        });
        assign_parents(&mut contours);
        log::trace!("traced {} contours", contours.len());

        Contours { contours }
    }

    fn make_contour(&self, edges: &[BoundaryEdge], segs: &[usize]) -> Option<Contour> {
        // Keep only the corners, dropping points where the direction doesn't change.
        let mut points: Vec<Point> = segs
            .iter()
            .enumerate()
            .filter(|&(i, &seg)| {
                let prev = segs[(i + segs.len() - 1) % segs.len()];
                edges[prev].dir != edges[seg].dir
            })
            .map(|(_, &seg)| self.point(edges[seg].from))
            .collect();

        let ring = Ring::new(points.clone());
        if ring.is_degenerate() {
            log::warn!("dropping a degenerate contour with points {points:?}");
            return None;
        }

        // Start at the first point in sweep-line order.
        if let Some(min_idx) = points.iter().enumerate().min_by_key(|(_, p)| **p).map(|(i, _)| i) {
            points.rotate_left(min_idx);
        }
        let outer = ring.is_counter_clockwise();
        Some(Contour {
            points,
            parent: None,
            outer,
        })
    }
}

/// The doubled coordinates of the center of the unit square next to the first
/// edge of this contour, on its left (if `left` is true) or on its right.
fn sample_point(points: &[Point], left: bool) -> (i64, i64) {
    let p = points[0];
    let q = points[1 % points.len()];
    let (dx, dy) = ((q.x - p.x).signum(), (q.y - p.y).signum());
    // The normal pointing to the left of (dx, dy) is (-dy, dx).
    let (nx, ny) = if left { (-dy, dx) } else { (dy, -dx) };
    (2 * p.x + dx + nx, 2 * p.y + dy + ny)
}

// A contour's parent is the smallest contour of the opposite kind that contains
// the area just across its boundary.
fn assign_parents(contours: &mut [Contour]) {
    let rings: Vec<Ring> = contours.iter().map(Contour::ring).collect();
    let areas: Vec<i128> = rings.iter().map(|r| r.signed_area2().abs()).collect();

    for i in 0..contours.len() {
        // Outer contours have their inside on the left, so the outside is on the right.
        let (x2, y2) = sample_point(&contours[i].points, !contours[i].outer);
        let parent = (0..contours.len())
            .filter(|&j| j != i && contours[j].outer != contours[i].outer)
            .filter(|&j| rings[j].winding_number_doubled(x2, y2) != 0)
            .min_by_key(|&j| areas[j]);
        contours[i].parent = parent.map(ContourIdx);
    }
}

/// An index for a [`Contour`] within [`Contours`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Serialize)]
pub struct ContourIdx(pub usize);

/// A closed, rectilinear polyline.
///
/// The segments of a contour never cross. A point can repeat, but only at a
/// corner where the set touches itself diagonally, and then the contour
/// passes through it exactly twice. There are no redundant points either:
/// consecutive edges always turn.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Contour {
    /// The points making up this contour, starting from the first one in
    /// sweep-line order.
    ///
    /// If you're drawing a contour with line segments, don't forget to close it: the last point
    /// should be connected to the first point.
    pub points: Vec<Point>,

    /// A contour can have a parent, so that sets with holes can be represented as nested contours.
    /// For example, a 3x3 block of cells with its center missing is represented
    /// as a square contour with no parent and a unit-square contour with the
    /// big square as its parent:
    ///
    /// ```text
    ///   +---+---+---+
    ///   |xxxxxxxxxxx|
    ///   +xxx+---+xxx+
    ///   |xxx|   |xxx|
    ///   +xxx+---+xxx+
    ///   |xxxxxxxxxxx|
    ///   +---+---+---+
    /// ```
    ///
    /// A contour can share points with its parent, or with its siblings, but
    /// only at corners where the set touches itself diagonally.
    pub parent: Option<ContourIdx>,

    /// Whether this contour is "outer" or not. A contour with no parent is "outer", and
    /// then they alternate: a contour is "outer" if and only if its parent isn't.
    ///
    /// As you walk along a contour, the "occupied" part of the set it represents is
    /// on your left. This means that outer contours wind counter-clockwise and inner
    /// contours wind clockwise.
    pub outer: bool,
}

impl Contour {
    /// This contour's points as a [`Ring`].
    pub fn ring(&self) -> Ring {
        Ring::new(self.points.clone())
    }
}

/// A collection of [`Contour`]s.
///
/// Can be indexed with a [`ContourIdx`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, Default)]
pub struct Contours {
    contours: Vec<Contour>,
}

impl Contours {
    /// Returns all of the contour indices, grouped by containment.
    ///
    /// For each of the inner vecs, the first element is an outer contour with
    /// no parent. All of the other contours in that inner vec lie inside that
    /// outer contour.
    pub fn grouped(&self) -> Vec<Vec<ContourIdx>> {
        let mut children = vec![Vec::new(); self.contours.len()];
        let mut top_level = Vec::new();
        for i in 0..self.contours.len() {
            if let Some(parent) = self.contours[i].parent {
                children[parent.0].push(ContourIdx(i));
            } else {
                top_level.push(ContourIdx(i));
            }
        }

        let mut ret = Vec::with_capacity(top_level.len());
        for top in top_level {
            let mut tree = Vec::new();
            fn visit(idx: ContourIdx, children: &[Vec<ContourIdx>], acc: &mut Vec<ContourIdx>) {
                acc.push(idx);
                for &child in &children[idx.0] {
                    visit(child, children, acc);
                }
            }
            visit(top, &children, &mut tree);
            ret.push(tree);
        }

        ret
    }

    /// Iterates over all of the contours.
    pub fn contours(&self) -> impl Iterator<Item = &Contour> + '_ {
        self.contours.iter()
    }

    /// The number of contours.
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    /// Returns `true` if there are no contours at all.
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

impl std::ops::Index<ContourIdx> for Contours {
    type Output = Contour;

    fn index(&self, index: ContourIdx) -> &Self::Output {
        &self.contours[index.0]
    }
}
