#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
pub mod cell;
pub mod emit;
mod geom;
pub mod holes;
pub mod region;
pub mod segments;
pub mod sweep;
pub mod topology;

#[cfg(feature = "generators")]
pub mod generators;

pub use cell::{Cell, CellBounds, CellSet};
pub use emit::{Multiplicity, Options, PolygonWithHoles, Scale};
pub use geom::{Point, Ring};
pub use region::{Region, Role};

use topology::{Topology, WindingNumber};

/// Binary operations between sets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BinaryOp {
    /// A point is in the union of two sets if it is in either one.
    Union,
    /// A point is in the intersection of two sets if it is in both.
    Intersection,
    /// A point is in the difference of two sets if it is in the first but not the second.
    Difference,
    /// A point is in the exclusive-or of two sets if it is in one or the other, but not both.
    Xor,
}

impl BinaryOp {
    /// Is a point with these winding numbers inside the result?
    ///
    /// A point is inside an operand if its winding number is non-zero.
    pub fn contains(self, windings: WindingNumber) -> bool {
        let a = windings.shape_a != 0;
        let b = windings.shape_b != 0;
        match self {
            BinaryOp::Union => a || b,
            BinaryOp::Intersection => a && b,
            BinaryOp::Difference => a && !b,
            BinaryOp::Xor => a != b,
        }
    }
}

/// The input was faulty, or the output can't be represented.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The scale factor was not positive, or was too large.
    #[error("invalid scale {0}: the scale must be between 1 and {max}", max = Scale::MAX)]
    InvalidScale(i64),
    /// A ring had an edge that was neither horizontal nor vertical.
    #[error("the edge from {from:?} to {to:?} is neither horizontal nor vertical")]
    NonRectilinear {
        /// The start of the offending edge.
        from: Point,
        /// The end of the offending edge.
        to: Point,
    },
    /// A coordinate was beyond [`Point::MAX_COORD`], either in an input ring
    /// or after scaling.
    #[error("coordinate out of range (the limit is {max})", max = Point::MAX_COORD)]
    CoordinateOverflow,
    /// Exactly one outer ring was required, but there were several.
    #[error("expected a single outer contour, found {0}")]
    MultipleOuterContours(usize),
}

/// Computes a boolean operation between two regions.
///
/// Both regions are swept together, so their boundaries share a single
/// cell complex. Within each region a point is covered if its winding number
/// (with outer rings counting positively and holes negatively) is non-zero.
pub fn binary_op(set_a: &Region, set_b: &Region, op: BinaryOp) -> Result<Region, Error> {
    let a = set_a.oriented_rings();
    let b = set_b.oriented_rings();
    let top = Topology::from_rings(&a, &b)?;
    let contours = top.contours(|w| op.contains(w));
    log::trace!("{op:?} produced {} contours", contours.len());
    Ok(Region::from(&contours))
}

/// Turns a set of grid cells into an outline with holes.
///
/// The cells are unioned into a region, that region's holes are filled in,
/// and every cell that the filled region covers but that isn't in `cells`
/// becomes a hole of its own. Everything is then scaled by the scale in
/// `options`, which is checked before anything else happens.
///
/// An empty `cells` gives an empty result, with [`Multiplicity::Empty`].
pub fn outline(cells: &CellSet, options: &Options) -> Result<PolygonWithHoles, Error> {
    let scale = options.scale()?;
    log::debug!("outlining {} cells", cells.len());

    let region = Region::from_cells(cells)?;
    log::debug!(
        "union has {} outer and {} hole contours",
        region.outers().count(),
        region.holes().count()
    );

    let filled = region.fill()?;
    log::debug!("filled region has {} outer contours", filled.outers().count());

    let holes = holes::hole_cells(&filled, cells);
    emit::emit(&filled, &holes, scale)
}
