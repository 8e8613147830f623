//! Utilities for fuzz and/or property testing using `arbitrary`.

use std::collections::{HashMap, HashSet};

use arbitrary::Unstructured;

use crate::{
    cell::CellSet, holes::hole_cells, outline, BinaryOp, Cell, Options, Point, Region, Ring,
};

/// Generate an arbitrary cell in `[0, size)²`.
pub fn cell(size: i32, u: &mut Unstructured<'_>) -> Result<Cell, arbitrary::Error> {
    let max = size.max(1) - 1;
    Ok(Cell::new(u.int_in_range(0..=max)?, u.int_in_range(0..=max)?))
}

/// Generate an arbitrary set of cells in `[0, size)²`.
///
/// Small grids are dense enough that enclosed holes (and corner-touching
/// cells) come up often.
pub fn cell_set(size: i32, u: &mut Unstructured<'_>) -> Result<CellSet, arbitrary::Error> {
    let mut ret = CellSet::new();
    u.arbitrary_loop(None, Some(256), |u| {
        ret.insert(cell(size, u)?);
        Ok(std::ops::ControlFlow::Continue(()))
    })?;
    Ok(ret)
}

/// Generate an arbitrary scale, biased towards small ones.
pub fn scale(u: &mut Unstructured<'_>) -> Result<i64, arbitrary::Error> {
    if u.ratio(1, 8)? {
        Ok(u.int_in_range(-4..=0)?)
    } else {
        Ok(u.int_in_range(1..=64)?)
    }
}

/// Finds the missing cells in the bounding box of `cells` that can't reach
/// the outside through other missing cells, where a step may go to any of the
/// eight neighbors.
///
/// This is a slow flood fill that shares no code with [`hole_cells`], so the
/// two can be checked against each other.
pub fn enclosed_cells(cells: &CellSet) -> Vec<Cell> {
    let Some(bounds) = cells.bounds() else {
        return Vec::new();
    };
    let (x0, y0) = (i64::from(bounds.min_x) - 1, i64::from(bounds.min_y) - 1);
    let (x1, y1) = (i64::from(bounds.max_x) + 1, i64::from(bounds.max_y) + 1);
    let is_missing = |x: i64, y: i64| match (i32::try_from(x), i32::try_from(y)) {
        (Ok(x), Ok(y)) => !cells.contains(Cell::new(x, y)),
        _ => true,
    };

    // The one-cell margin around the bounding box is all missing, so starting
    // from its corner reaches every part of it.
    let mut outside = HashSet::from([(x0, y0)]);
    let mut stack = vec![(x0, y0)];
    while let Some((x, y)) = stack.pop() {
        for (dx, dy) in (-1..=1).flat_map(|dx| (-1..=1).map(move |dy| (dx, dy))) {
            let (nx, ny) = (x + dx, y + dy);
            if (x0..=x1).contains(&nx)
                && (y0..=y1).contains(&ny)
                && is_missing(nx, ny)
                && outside.insert((nx, ny))
            {
                stack.push((nx, ny));
            }
        }
    }

    bounds
        .cells()
        .filter(|&c| !cells.contains(c) && !outside.contains(&(i64::from(c.x), i64::from(c.y))))
        .collect()
}

/// The largest number of times any single point appears in `ring`.
pub fn max_vertex_repeats(ring: &Ring) -> usize {
    let mut counts: HashMap<Point, usize> = HashMap::new();
    for &p in ring.points() {
        *counts.entry(p).or_default() += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

/// Runs the whole pipeline on arbitrary input and checks its invariants.
///
/// Panics if one of them fails.
pub fn outline_invariants(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
    let cells = cell_set(12, u)?;
    let scale = scale(u)?;
    let Ok(out) = outline(&cells, &Options::with_scale(scale)) else {
        assert!(scale <= 0);
        return Ok(());
    };

    let region = Region::from_cells(&cells).unwrap();
    assert_eq!(region.area(), cells.len() as i128);

    let filled = region.fill().unwrap();
    assert_eq!(filled.holes().count(), 0);
    assert!(region
        .binary_op(&filled, BinaryOp::Difference)
        .unwrap()
        .is_empty());

    let holes = hole_cells(&filled, &cells);
    assert!(holes.iter().all(|&c| !cells.contains(c)));
    assert!(holes.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(holes, enclosed_cells(&cells));
    assert_eq!(out.holes.len(), holes.len());
    assert_eq!(out.outer.len(), filled.outers().count());

    let scale2 = i128::from(scale * scale);
    for ring in &out.outer {
        assert!(ring.is_counter_clockwise());
        assert!(max_vertex_repeats(ring) <= 2);
    }
    for hole in &out.holes {
        assert_eq!(hole.signed_area2(), -2 * scale2);
    }
    let outer_area2: i128 = out.outer.iter().map(|r| r.signed_area2()).sum();
    assert_eq!(outer_area2, 2 * scale2 * (cells.len() + holes.len()) as i128);
    Ok(())
}
