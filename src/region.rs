//! Planar regions with explicitly tagged holes.

use kurbo::BezPath;

use crate::{
    cell::{Cell, CellBounds, CellSet},
    geom::Ring,
    topology::{Contours, Topology},
    BinaryOp, Error,
};

/// What a ring of a [`Region`] contributes to the region's area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    /// The ring bounds some area of the region from the outside.
    Outer,
    /// The ring bounds an uncovered area inside an outer ring.
    Hole,
}

impl Role {
    fn sign(self) -> i32 {
        match self {
            Role::Outer => 1,
            Role::Hole => -1,
        }
    }
}

/// A planar region, described by rings that are each tagged as outer boundaries or holes.
///
/// A point is covered by the region if the outer rings around it outnumber
/// the holes around it. The orientation of the rings doesn't matter: only
/// their [`Role`]s do. Regions built by this crate have disjoint outer rings,
/// each followed by the holes (and islands within holes) that it contains.
/// A ring can touch itself at a corner: an outer ring goes around a notch that
/// opens to the outside only through a corner, instead of leaving it as a hole.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    contours: Vec<(Ring, Role)>,
}

impl FromIterator<(Ring, Role)> for Region {
    fn from_iter<T: IntoIterator<Item = (Ring, Role)>>(iter: T) -> Self {
        Region {
            contours: iter.into_iter().collect(),
        }
    }
}

impl From<&Contours> for Region {
    fn from(contours: &Contours) -> Self {
        contours
            .grouped()
            .into_iter()
            .flatten()
            .map(|idx| {
                let c = &contours[idx];
                let role = if c.outer { Role::Outer } else { Role::Hole };
                (c.ring(), role)
            })
            .collect()
    }
}

impl Region {
    /// The empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// The union of a collection of rectilinear rings, each one treated as a solid shape.
    ///
    /// Orientation is ignored, so rings can't cancel one another out. Where
    /// the rings surround an area that none of them cover, the result has a
    /// hole.
    pub fn from_rings<'a>(rings: impl IntoIterator<Item = &'a Ring>) -> Result<Region, Error> {
        let solid: Vec<Ring> = rings.into_iter().map(|r| r.oriented(true)).collect();
        let top = Topology::from_rings(&solid, std::iter::empty::<&Ring>())?;
        Ok(Region::from(&top.contours(|w| w.shape_a != 0)))
    }

    /// The union of the unit squares of some cells.
    pub fn from_cells(cells: &CellSet) -> Result<Region, Error> {
        let rings: Vec<Ring> = cells.rings().collect();
        Region::from_rings(&rings)
    }

    /// Iterates over all the rings and their roles.
    pub fn contours(&self) -> impl Iterator<Item = (&Ring, Role)> + '_ {
        self.contours.iter().map(|(ring, role)| (ring, *role))
    }

    /// Iterates over all the rings, regardless of their roles.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        self.contours.iter().map(|(ring, _)| ring)
    }

    /// Iterates over the outer rings.
    pub fn outers(&self) -> impl Iterator<Item = &Ring> + '_ {
        self.rings_with_role(Role::Outer)
    }

    /// Iterates over the holes, including the holes of islands.
    pub fn holes(&self) -> impl Iterator<Item = &Ring> + '_ {
        self.rings_with_role(Role::Hole)
    }

    fn rings_with_role(&self, role: Role) -> impl Iterator<Item = &Ring> + '_ {
        self.contours
            .iter()
            .filter(move |(_, r)| *r == role)
            .map(|(ring, _)| ring)
    }

    /// Does this region have no rings at all?
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// The rings, oriented according to their roles: counter-clockwise for
    /// outer rings and clockwise for holes.
    pub(crate) fn oriented_rings(&self) -> Vec<Ring> {
        self.contours
            .iter()
            .map(|(ring, role)| ring.oriented(*role == Role::Outer))
            .collect()
    }

    /// Computes a boolean operation between this region and another one.
    pub fn binary_op(&self, other: &Region, op: BinaryOp) -> Result<Region, Error> {
        crate::binary_op(self, other, op)
    }

    /// The union of this region and another one.
    pub fn union(&self, other: &Region) -> Result<Region, Error> {
        self.binary_op(other, BinaryOp::Union)
    }

    /// Returns this region with all of its holes filled in.
    ///
    /// Every ring, including the holes, is re-interpreted as a solid shape and
    /// the results are unioned together. This fills holes whose boundaries
    /// belong to this region, but it leaves notches in the outer boundary
    /// alone: it is not a convex hull.
    pub fn fill(&self) -> Result<Region, Error> {
        Region::from_rings(self.rings())
    }

    /// The winding number of this region around the point `(x2 / 2, y2 / 2)`.
    ///
    /// See [`Ring::winding_number_doubled`] for the coordinates.
    pub fn winding_number_doubled(&self, x2: i64, y2: i64) -> i32 {
        self.contours
            .iter()
            .map(|(ring, role)| ring.winding_number_doubled(x2, y2).abs() * role.sign())
            .sum()
    }

    /// Does this region cover the interior of this cell?
    ///
    /// The test is made at the center of the cell, which is never on the
    /// boundary of a region with integer coordinates.
    pub fn contains_cell(&self, cell: Cell) -> bool {
        let (x2, y2) = cell.doubled_center();
        self.winding_number_doubled(x2, y2) > 0
    }

    /// All the cells within `bounds` that this region covers.
    pub fn covered_cells(&self, bounds: CellBounds) -> CellSet {
        bounds.cells().filter(|&c| self.contains_cell(c)).collect()
    }

    /// The covered area, in lattice units.
    pub fn area(&self) -> i128 {
        let area2: i128 = self
            .contours
            .iter()
            .map(|(ring, role)| ring.signed_area2().abs() * i128::from(role.sign()))
            .sum();
        area2 / 2
    }

    /// Converts this region to a path with one closed subpath per ring.
    ///
    /// The subpaths are oriented by role, so the path can be filled with
    /// either fill rule.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for ring in self.oriented_rings() {
            ring.append_to(&mut path);
        }
        path
    }

    /// Draws this region, for debugging.
    #[cfg(feature = "debug-svg")]
    pub fn dump_svg(&self) -> svg::Document {
        use kurbo::Shape as _;
        use svg::node::element::{path::Data, Path};

        let path = self.to_bez_path();
        let bbox = path.bounding_box();
        let pad = 1.0;
        let stroke_width = bbox.width().max(bbox.height()) / 512.0;
        let mut document = svg::Document::new().set(
            "viewBox",
            (
                bbox.min_x() - pad,
                bbox.min_y() - pad,
                bbox.width() + 2.0 * pad,
                bbox.height() + 2.0 * pad,
            ),
        );

        for (ring, role) in self.contours() {
            let mut points = ring.points().iter();
            let Some(p) = points.next() else {
                continue;
            };
            let mut data = Data::new().move_to((p.x as f64, p.y as f64));
            for p in points {
                data = data.line_to((p.x as f64, p.y as f64));
            }
            data = data.close();
            let color = match role {
                Role::Outer => "black",
                Role::Hole => "red",
            };
            let path = Path::new()
                .set("stroke", color)
                .set("stroke-width", stroke_width)
                .set("fill", "none")
                .set("d", data);
            document = document.add(path);
        }
        document
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::geom::{tests::ring, Point};

    fn cells(cs: &[(i32, i32)]) -> CellSet {
        cs.iter().copied().collect()
    }

    fn block_without(w: i32, h: i32, missing: &[(i32, i32)]) -> CellSet {
        (0..w)
            .flat_map(|x| (0..h).map(move |y| (x, y)))
            .filter(|c| !missing.contains(c))
            .collect()
    }

    fn same_area(a: &Region, b: &Region) -> bool {
        a.binary_op(b, BinaryOp::Xor).unwrap().is_empty()
    }

    #[test]
    fn empty_input() {
        let region = Region::from_cells(&CellSet::new()).unwrap();
        assert!(region.is_empty());
        assert_eq!(region.area(), 0);
        assert!(region.fill().unwrap().is_empty());
    }

    #[test]
    fn adjacent_cells_merge() {
        let region = Region::from_cells(&cells(&[(0, 0), (1, 0), (2, 0)])).unwrap();
        assert_eq!(region.outers().count(), 1);
        assert_eq!(region.holes().count(), 0);
        assert_eq!(
            region.outers().next().unwrap().points(),
            &[
                Point::new(0, 0),
                Point::new(3, 0),
                Point::new(3, 1),
                Point::new(0, 1)
            ]
        );
        assert_eq!(region.area(), 3);
    }

    #[test]
    fn disjoint_groups() {
        let region = Region::from_cells(&cells(&[(0, 0), (0, 1), (5, 5)])).unwrap();
        assert_eq!(region.outers().count(), 2);
        assert_eq!(region.area(), 3);
    }

    #[test]
    fn enclosed_cell_is_a_hole() {
        let region = Region::from_cells(&block_without(3, 3, &[(1, 1)])).unwrap();
        assert_eq!(region.outers().count(), 1);
        assert_eq!(region.holes().count(), 1);
        assert_eq!(region.area(), 8);
        assert!(!region.contains_cell(Cell::new(1, 1)));
        assert!(region.contains_cell(Cell::new(0, 0)));

        let filled = region.fill().unwrap();
        assert_eq!(filled.holes().count(), 0);
        assert_eq!(filled.area(), 9);
        assert!(filled.contains_cell(Cell::new(1, 1)));
    }

    #[test]
    fn fill_keeps_notches() {
        // A U shape: the gap at the top touches the outside.
        let u = Region::from_cells(&block_without(3, 3, &[(1, 1), (1, 2)])).unwrap();
        let filled = u.fill().unwrap();
        assert!(same_area(&u, &filled));
        assert!(!filled.contains_cell(Cell::new(1, 1)));
    }

    #[test]
    fn notch_through_a_corner() {
        // The missing center reaches the outside through the missing corner.
        let region = Region::from_cells(&block_without(3, 3, &[(1, 1), (2, 2)])).unwrap();
        assert_eq!(region.outers().count(), 1);
        assert_eq!(region.holes().count(), 0);
        assert_eq!(region.outers().next().unwrap().len(), 10);
        assert_eq!(region.area(), 7);

        let filled = region.fill().unwrap();
        assert_eq!(filled, region);
        assert!(!filled.contains_cell(Cell::new(1, 1)));
        assert!(!filled.contains_cell(Cell::new(2, 2)));
    }

    #[test]
    fn union_of_overlapping_rings() {
        let a = ring(&[(0, 0), (2, 0), (2, 2), (0, 2)]);
        let b = ring(&[(1, 1), (1, 3), (3, 3), (3, 1)]);
        let region = Region::from_rings([&a, &b]).unwrap();
        assert_eq!(region.outers().count(), 1);
        assert_eq!(region.outers().next().unwrap().len(), 8);
        assert_eq!(region.area(), 7);
    }

    #[test]
    fn roles_not_orientation() {
        // The same hole, given with either orientation.
        let outer = ring(&[(0, 0), (3, 0), (3, 3), (0, 3)]);
        let hole = ring(&[(1, 1), (2, 1), (2, 2), (1, 2)]);
        let a: Region = [(outer.clone(), Role::Outer), (hole.clone(), Role::Hole)]
            .into_iter()
            .collect();
        let b: Region = [(outer.reversed(), Role::Outer), (hole.reversed(), Role::Hole)]
            .into_iter()
            .collect();
        assert_eq!(a.area(), 8);
        assert_eq!(b.area(), 8);
        assert!(!a.contains_cell(Cell::new(1, 1)));
        assert!(!b.contains_cell(Cell::new(1, 1)));
        assert!(same_area(&a, &b));
    }

    #[test]
    fn binary_ops() {
        let a = Region::from_cells(&cells(&[(0, 0), (1, 0)])).unwrap();
        let b = Region::from_cells(&cells(&[(1, 0), (2, 0)])).unwrap();
        assert_eq!(a.binary_op(&b, BinaryOp::Union).unwrap().area(), 3);
        assert_eq!(a.binary_op(&b, BinaryOp::Intersection).unwrap().area(), 1);
        assert_eq!(a.binary_op(&b, BinaryOp::Difference).unwrap().area(), 1);
        let xor = a.binary_op(&b, BinaryOp::Xor).unwrap();
        assert_eq!(xor.area(), 2);
        assert_eq!(xor.outers().count(), 2);
    }

    #[test]
    fn non_rectilinear_rings_are_rejected() {
        let triangle = ring(&[(0, 0), (2, 0), (0, 2)]);
        assert_matches::assert_matches!(
            Region::from_rings([&triangle]),
            Err(Error::NonRectilinear { .. })
        );
    }

    #[test]
    fn bez_path_orientation() {
        let region = Region::from_cells(&block_without(3, 3, &[(1, 1)])).unwrap();
        let path = region.to_bez_path();
        // Two closed subpaths of four corners each.
        assert_eq!(path.elements().len(), 10);
        let area = kurbo::Shape::area(&path);
        assert!((area.abs() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn covered_cells() {
        let input = block_without(3, 3, &[(1, 1)]);
        let region = Region::from_cells(&input).unwrap();
        let bounds = input.bounds().unwrap();
        assert_eq!(region.covered_cells(bounds), input);
    }

    #[cfg(feature = "debug-svg")]
    #[test]
    fn dump_svg() {
        let region = Region::from_cells(&block_without(3, 3, &[(1, 1)])).unwrap();
        let doc = region.dump_svg().to_string();
        assert_eq!(doc.matches("<path").count(), 2);
        assert!(doc.contains("stroke=\"red\""));
    }

    fn small_cell_set() -> impl Strategy<Value = CellSet> {
        prop::collection::vec((0i32..8, 0i32..8), 0..40)
            .prop_map(|cs| cs.into_iter().collect())
    }

    proptest! {
    #[test]
    fn union_is_idempotent(input in small_cell_set()) {
        let region = Region::from_cells(&input).unwrap();
        let doubled = region.union(&region).unwrap();
        prop_assert!(same_area(&region, &doubled));
        prop_assert_eq!(region.area(), doubled.area());
    }

    #[test]
    fn fill_is_idempotent(input in small_cell_set()) {
        let filled = Region::from_cells(&input).unwrap().fill().unwrap();
        let refilled = filled.fill().unwrap();
        prop_assert!(same_area(&filled, &refilled));
    }

    #[test]
    fn fill_covers_the_original(input in small_cell_set()) {
        let region = Region::from_cells(&input).unwrap();
        let filled = region.fill().unwrap();
        let uncovered = region.binary_op(&filled, BinaryOp::Difference).unwrap();
        prop_assert!(uncovered.is_empty());
        prop_assert!(filled.area() >= region.area());
        prop_assert_eq!(filled.holes().count(), 0);
    }

    #[test]
    fn region_covers_exactly_its_cells(input in small_cell_set()) {
        let region = Region::from_cells(&input).unwrap();
        prop_assert_eq!(region.area(), input.len() as i128);
        if let Some(bounds) = input.bounds() {
            prop_assert_eq!(region.covered_cells(bounds), input);
        }
    }

    #[test]
    fn contours_touch_themselves_only_at_corners(input in small_cell_set()) {
        let region = Region::from_cells(&input).unwrap();
        for ring in region.rings() {
            prop_assert!(ring.len() >= 4);
            prop_assert!(crate::arbitrary::max_vertex_repeats(ring) <= 2);
        }
        for (ring, role) in region.contours() {
            prop_assert_eq!(ring.is_counter_clockwise(), role == Role::Outer);
        }
    }
    }
}
