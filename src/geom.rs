//! Geometric primitives: lattice points and closed rings.

use kurbo::BezPath;

use crate::{emit::Scale, Error};

/// A point on the integer lattice.
///
/// Points are sorted by `y` and then by `x`, for the convenience of our sweep-line
/// algorithm (which moves in increasing `y`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Vertical coordinate.
    ///
    /// Orientation terms in this crate ("counter-clockwise", "left") assume
    /// that larger values are up. On a map whose vertical axis points down,
    /// everything is mirrored but nothing else changes.
    pub y: i64,
    /// Horizontal coordinate.
    pub x: i64,
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Point {
    /// The largest coordinate magnitude that rings entering a boolean
    /// operation may have, and that scaling may produce.
    ///
    /// Doubled coordinates and the products of their differences stay well
    /// inside `i128` below this.
    pub const MAX_COORD: i64 = 1 << 60;

    /// Create a new point.
    ///
    /// The `x` coordinate comes first, even though points sort by `y` first.
    pub fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }

    /// Converts to a floating-point `kurbo` point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x as f64, self.y as f64)
    }

    fn is_in_range(self) -> bool {
        self.x.unsigned_abs() <= Self::MAX_COORD.unsigned_abs()
            && self.y.unsigned_abs() <= Self::MAX_COORD.unsigned_abs()
    }

    fn scaled(self, factor: i64) -> Result<Self, Error> {
        let p = Point {
            x: self.x.checked_mul(factor).ok_or(Error::CoordinateOverflow)?,
            y: self.y.checked_mul(factor).ok_or(Error::CoordinateOverflow)?,
        };
        if p.is_in_range() {
            Ok(p)
        } else {
            Err(Error::CoordinateOverflow)
        }
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// A closed loop of lattice points.
///
/// The last point is implicitly connected back to the first; don't repeat it.
/// Rings built by this crate have at least three vertices and never cross
/// themselves, although they can touch themselves at a corner. A `Ring`
/// constructed by hand is taken at face value, but the area and winding
/// computations are only exact while its coordinates are within
/// [`Point::MAX_COORD`].
#[derive(Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Ring {
    points: Vec<Point>,
}

impl std::fmt::Debug for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.points).finish()
    }
}

impl<P: Into<Point>> FromIterator<P> for Ring {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        Ring {
            points: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Ring {
    /// Creates a ring from its vertices, without checking them.
    pub fn new(points: Vec<Point>) -> Self {
        Ring { points }
    }

    /// The vertices of this ring, in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if this ring has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the edges of this ring, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let next = self.points.iter().cycle().skip(1);
        self.points.iter().copied().zip(next.copied())
    }

    /// Twice the signed (shoelace) area of this ring.
    ///
    /// Positive for counter-clockwise rings, negative for clockwise ones.
    pub fn signed_area2(&self) -> i128 {
        self.edges()
            .map(|(p, q)| i128::from(p.x) * i128::from(q.y) - i128::from(q.x) * i128::from(p.y))
            .sum()
    }

    /// Returns `true` if this ring has positive area.
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area2() > 0
    }

    /// The number of distinct vertices. Rings with fewer than three of these are degenerate.
    pub fn distinct_vertices(&self) -> usize {
        let mut ps = self.points.clone();
        ps.sort();
        ps.dedup();
        ps.len()
    }

    /// Returns `true` if this ring encloses nothing.
    pub fn is_degenerate(&self) -> bool {
        self.distinct_vertices() < 3 || self.signed_area2() == 0
    }

    /// Returns this ring with the opposite orientation.
    pub fn reversed(&self) -> Ring {
        let mut points = self.points.clone();
        points.reverse();
        Ring { points }
    }

    /// Returns this ring, reversed if necessary so that it winds counter-clockwise
    /// (if `ccw` is true) or clockwise.
    pub fn oriented(&self, ccw: bool) -> Ring {
        if self.is_counter_clockwise() == ccw {
            self.clone()
        } else {
            self.reversed()
        }
    }

    /// The winding number of this ring around the point `(x2 / 2, y2 / 2)`.
    ///
    /// Taking doubled coordinates lets callers ask about cell centers exactly.
    /// The answer is unspecified if the point lies on the ring.
    pub fn winding_number_doubled(&self, x2: i64, y2: i64) -> i32 {
        let (x2, y2) = (i128::from(x2), i128::from(y2));
        let mut winding = 0;
        for (p, q) in self.edges() {
            let (px, py) = (2 * i128::from(p.x), 2 * i128::from(p.y));
            let (qx, qy) = (2 * i128::from(q.x), 2 * i128::from(q.y));
            // Which side of the edge is the point on?
            let side = (qx - px) * (y2 - py) - (x2 - px) * (qy - py);
            if py <= y2 {
                if qy > y2 && side > 0 {
                    winding += 1;
                }
            } else if qy <= y2 && side < 0 {
                winding -= 1;
            }
        }
        winding
    }

    /// Multiplies every coordinate by `scale`.
    pub fn scaled(&self, scale: Scale) -> Result<Ring, Error> {
        let factor = scale.get();
        self.points
            .iter()
            .map(|p| p.scaled(factor))
            .collect::<Result<Vec<_>, _>>()
            .map(Ring::new)
    }

    /// Checks that every edge is horizontal or vertical, and that every
    /// coordinate is within [`Point::MAX_COORD`].
    pub(crate) fn check_rectilinear(&self) -> Result<(), Error> {
        if !self.points.iter().all(|p| p.is_in_range()) {
            return Err(Error::CoordinateOverflow);
        }
        match self.edges().find(|(p, q)| p.x != q.x && p.y != q.y) {
            Some((from, to)) => Err(Error::NonRectilinear { from, to }),
            None => Ok(()),
        }
    }

    /// Converts this ring to a closed path.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        self.append_to(&mut path);
        path
    }

    pub(crate) fn append_to(&self, path: &mut BezPath) {
        let mut points = self.points.iter();
        let Some(first) = points.next() else {
            return;
        };
        path.move_to(first.to_kurbo());
        for p in points {
            path.line_to(p.to_kurbo());
        }
        path.close_path();
    }
}
