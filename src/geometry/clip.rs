//! Boolean, buffer and simplification operations backed by clipper2.
//!
//! clipper2 works on integer coordinates at 1/100 of a unit, so callers that
//! need finer detail should work in a larger unit scale and rescale after.

use clipper2::{EndType, FillRule, JoinType, Paths};

use super::{Point, Region, Ring};
use crate::error::MapError;

/// Miter limit for buffered polylines (ratio of miter length to offset).
const MITER_LIMIT: f64 = 2.0;

/// Join style used where buffered polyline pieces meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Join {
    /// Corners are squared off (blocky, low resolution).
    Square,
    /// Corners are extended to a sharp point.
    Miter,
}

impl Join {
    fn to_clipper(self) -> JoinType {
        match self {
            Join::Square => JoinType::Square,
            Join::Miter => JoinType::Miter,
        }
    }
}

fn to_paths<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Paths {
    let coords: Vec<Vec<(f64, f64)>> = regions
        .into_iter()
        .flat_map(|region| region.rings().iter())
        .map(|ring| ring.points().iter().map(|p| (p.x, p.y)).collect())
        .collect();
    coords.into()
}

fn from_paths(paths: Paths) -> Region {
    let coords: Vec<Vec<(f64, f64)>> = paths.into();
    let mut rings: Vec<Ring> = coords
        .into_iter()
        .filter(|path| path.len() >= 3)
        .map(|path| Ring::new(path.into_iter().map(Point::from).collect()))
        .collect();

    // Outer rings must wind counter-clockwise. clipper2 emits one consistent
    // orientation, so a negative total means every ring is reversed.
    let total: f64 = rings.iter().map(Ring::signed_area).sum();
    if total < 0.0 {
        rings = rings
            .into_iter()
            .map(|r| {
                let mut points = r.points().to_vec();
                points.reverse();
                Ring::new(points)
            })
            .collect();
    }
    Region::from_rings(rings)
}

/// Union of any number of regions.
pub fn union_all<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Result<Region, MapError> {
    let regions: Vec<&Region> = regions.into_iter().filter(|r| !r.is_empty()).collect();
    if regions.is_empty() {
        return Ok(Region::empty());
    }
    let subject = to_paths(regions);
    let clip: Paths = Vec::<Vec<(f64, f64)>>::new().into();
    let result = clipper2::union(subject, clip, FillRule::NonZero)
        .map_err(|e| MapError::Geometry(format!("union failed: {:?}", e)))?;
    Ok(from_paths(result))
}

/// Intersection of two regions.
pub fn intersection(a: &Region, b: &Region) -> Result<Region, MapError> {
    if a.is_empty() || b.is_empty() {
        return Ok(Region::empty());
    }
    let result = clipper2::intersect(to_paths([a]), to_paths([b]), FillRule::NonZero)
        .map_err(|e| MapError::Geometry(format!("intersection failed: {:?}", e)))?;
    Ok(from_paths(result))
}

/// Buffer open polylines by `distance` with square end caps. Overlapping
/// buffers are merged into one region.
pub fn buffer_polylines(lines: &[Vec<Point>], distance: f64, join: Join) -> Region {
    let coords: Vec<Vec<(f64, f64)>> = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.iter().map(|p| (p.x, p.y)).collect())
        .collect();
    if coords.is_empty() {
        return Region::empty();
    }
    let paths: Paths = coords.into();
    let inflated = paths.inflate(distance, join.to_clipper(), EndType::Square, MITER_LIMIT);
    from_paths(inflated)
}

/// Buffer a single open polyline; see [`buffer_polylines`].
pub fn buffer_polyline(line: &[Point], distance: f64, join: Join) -> Region {
    buffer_polylines(&[line.to_vec()], distance, join)
}

/// Drop vertices that deviate less than `tolerance` from their neighbours'
/// connecting line.
pub fn simplify(region: &Region, tolerance: f64) -> Region {
    if region.is_empty() || tolerance <= 0.0 {
        return region.clone();
    }
    from_paths(to_paths([region]).simplify(tolerance, false))
}
