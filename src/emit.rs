//! Scaling the result to output units and packaging it up.

use kurbo::BezPath;

use crate::{cell::Cell, geom::Ring, region::Region, Error};

/// The number of output units per cell.
///
/// A map chunk is 16 blocks wide, which is where the default comes from.
pub const DEFAULT_SCALE: i64 = 16;

/// A validated, positive scale factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Scale(i64);

impl Scale {
    /// The largest supported scale.
    ///
    /// Cell coordinates are `i32`s, so with scales up to this size scaling
    /// can't overflow an `i64`. It can still go beyond
    /// [`Point::MAX_COORD`](crate::Point::MAX_COORD) for cells far from the
    /// origin, which is reported as [`Error::CoordinateOverflow`].
    pub const MAX: i64 = i32::MAX as i64;

    /// Checks that `scale` is between 1 and [`Scale::MAX`].
    pub fn new(scale: i64) -> Result<Scale, Error> {
        if (1..=Self::MAX).contains(&scale) {
            Ok(Scale(scale))
        } else {
            Err(Error::InvalidScale(scale))
        }
    }

    /// The scale factor itself.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale(DEFAULT_SCALE)
    }
}

impl TryFrom<i64> for Scale {
    type Error = Error;

    fn try_from(scale: i64) -> Result<Self, Error> {
        Scale::new(scale)
    }
}

/// Options for turning cells into an outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Options {
    /// How many output units a cell is wide. Must be positive.
    pub scale: i64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            scale: DEFAULT_SCALE,
        }
    }
}

impl Options {
    /// The default options, but with this scale.
    pub fn with_scale(scale: i64) -> Self {
        Options { scale }
    }

    /// The validated scale factor.
    pub fn scale(&self) -> Result<Scale, Error> {
        self.scale.try_into()
    }
}

/// How many outer rings an outline has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Multiplicity {
    /// There were no cells, so there's nothing to draw.
    Empty,
    /// One connected outline.
    Single,
    /// Several disjoint outlines; the number is always at least two.
    Multiple(usize),
}

impl Multiplicity {
    fn of(count: usize) -> Self {
        match count {
            0 => Multiplicity::Empty,
            1 => Multiplicity::Single,
            n => Multiplicity::Multiple(n),
        }
    }
}

/// The finished outline: outer rings plus one hole ring per hole cell, in output units.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PolygonWithHoles {
    /// The outer boundaries, counter-clockwise when `y` points up.
    pub outer: Vec<Ring>,
    /// The hole rings, one unit square (at output scale) per hole cell.
    pub holes: Vec<Ring>,
}

impl PolygonWithHoles {
    /// How many outer rings there are.
    pub fn multiplicity(&self) -> Multiplicity {
        Multiplicity::of(self.outer.len())
    }

    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.outer.is_empty() && self.holes.is_empty()
    }

    /// The outer ring, for consumers that need exactly one.
    ///
    /// Fails with [`Error::MultipleOuterContours`] if there are several, and
    /// returns `None` if there are none.
    pub fn single_outer(&self) -> Result<Option<&Ring>, Error> {
        match self.multiplicity() {
            Multiplicity::Empty => Ok(None),
            Multiplicity::Single => Ok(self.outer.first()),
            Multiplicity::Multiple(n) => Err(Error::MultipleOuterContours(n)),
        }
    }

    /// Multiplies every coordinate by `scale`.
    pub fn scaled(&self, scale: Scale) -> Result<PolygonWithHoles, Error> {
        let scale_all = |rings: &[Ring]| -> Result<Vec<Ring>, Error> {
            rings.iter().map(|r| r.scaled(scale)).collect()
        };
        Ok(PolygonWithHoles {
            outer: scale_all(&self.outer)?,
            holes: scale_all(&self.holes)?,
        })
    }

    /// The outer rings and the hole rings, as two paths.
    pub fn to_bez_paths(&self) -> (BezPath, BezPath) {
        let mut outer = BezPath::new();
        for ring in &self.outer {
            ring.append_to(&mut outer);
        }
        let mut holes = BezPath::new();
        for ring in &self.holes {
            ring.append_to(&mut holes);
        }
        (outer, holes)
    }
}

/// Scales the outer rings of `filled` and the hole cells, and packages them together.
///
/// Holes of `filled` itself (there shouldn't be any, if it really was filled)
/// are not emitted: the hole cells are the only holes.
pub fn emit(filled: &Region, hole_cells: &[Cell], scale: Scale) -> Result<PolygonWithHoles, Error> {
    let outer = filled
        .outers()
        .map(|r| r.scaled(scale))
        .collect::<Result<Vec<_>, _>>()?;
    let holes = hole_cells
        .iter()
        .map(|c| c.ring().scaled(scale))
        .collect::<Result<Vec<_>, _>>()?;
    let ret = PolygonWithHoles { outer, holes };
    log::debug!(
        "emitted {:?} outline with {} holes at scale {}",
        ret.multiplicity(),
        ret.holes.len(),
        scale.get()
    );
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{cell::CellSet, geom::Point};

    #[test]
    fn scale_validation() {
        assert_matches!(Scale::new(0), Err(Error::InvalidScale(0)));
        assert_matches!(Scale::new(-16), Err(Error::InvalidScale(-16)));
        assert_matches!(Scale::new(Scale::MAX + 1), Err(Error::InvalidScale(_)));
        assert_eq!(Scale::new(1).unwrap().get(), 1);
        assert_eq!(Scale::default().get(), 16);
        assert_eq!(Options::default().scale().unwrap(), Scale::default());
        assert_matches!(Options::with_scale(0).scale(), Err(Error::InvalidScale(0)));
    }

    #[test]
    fn options_from_toml() {
        let options: Options = toml::from_str("scale = 4").unwrap();
        assert_eq!(options.scale, 4);
        let options: Options = toml::from_str("").unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn hole_rings_follow_cell_corners() {
        let scale = Scale::new(16).unwrap();
        let out = emit(&Region::new(), &[Cell::new(1, 3)], scale).unwrap();
        assert_eq!(
            out.holes[0].points(),
            &[
                Point::new(16, 48),
                Point::new(16, 64),
                Point::new(32, 64),
                Point::new(32, 48)
            ]
        );
    }

    #[test]
    fn multiplicity() {
        let scale = Scale::default();
        let one: CellSet = [(0, 0), (0, 1)].into_iter().collect();
        let two: CellSet = [(0, 0), (3, 3)].into_iter().collect();

        let empty = emit(&Region::new(), &[], scale).unwrap();
        assert_eq!(empty.multiplicity(), Multiplicity::Empty);
        assert!(empty.is_empty());
        assert_matches!(empty.single_outer(), Ok(None));

        let single = emit(&Region::from_cells(&one).unwrap(), &[], scale).unwrap();
        assert_eq!(single.multiplicity(), Multiplicity::Single);
        assert_matches!(single.single_outer(), Ok(Some(r)) if r.len() == 4);

        let double = emit(&Region::from_cells(&two).unwrap(), &[], scale).unwrap();
        assert_eq!(double.multiplicity(), Multiplicity::Multiple(2));
        assert_matches!(double.single_outer(), Err(Error::MultipleOuterContours(2)));
    }

    #[test]
    fn paths() {
        let cells: CellSet = [(0, 0)].into_iter().collect();
        let region = Region::from_cells(&cells).unwrap();
        let out = emit(&region, &[Cell::new(5, 5)], Scale::default()).unwrap();
        let (outer, holes) = out.to_bez_paths();
        assert_eq!(outer.elements().len(), 5);
        assert_eq!(holes.elements().len(), 5);
        assert_eq!(
            kurbo::Shape::bounding_box(&holes),
            kurbo::Rect::new(80.0, 80.0, 96.0, 96.0)
        );
    }
}
