//! Point-in-polygon predicates used by the filter engine.

use crate::config::ContainmentMode;
use geo::{Area, Intersects, Point};
use reportfence_types::polygon::DrawnPolygon;

/// Returns true iff `point` lies within `polygon`'s bounding region, edges
/// inclusive.
///
/// Degenerate polygons (empty ring, zero-area or non-finite bounds) contain
/// nothing.
///
/// # Examples
///
/// ```rust
/// use reportfence::containment_test;
/// use reportfence::{BoundingBox2D, DrawnPolygon, PolygonId};
/// use geo::Point;
///
/// let zone = DrawnPolygon::from_bbox(PolygonId(1), &BoundingBox2D::new(0.0, 0.0, 10.0, 10.0));
///
/// assert!(containment_test(&Point::new(10.0, 5.0), &zone));
/// assert!(!containment_test(&Point::new(11.0, 5.0), &zone));
/// ```
pub fn containment_test(point: &Point, polygon: &DrawnPolygon) -> bool {
    polygon
        .bounds()
        .is_some_and(|bounds| bounds.contains_point(point))
}

/// True polygon test: inside the exterior ring and outside every hole,
/// boundary inclusive. Zero-area polygons contain nothing.
pub fn contains_exact(point: &Point, polygon: &DrawnPolygon) -> bool {
    if !containment_test(point, polygon) {
        return false;
    }
    if polygon.geometry().unsigned_area() == 0.0 {
        return false;
    }
    polygon.geometry().intersects(point)
}

/// Dispatch on the configured containment mode.
pub fn contains(mode: ContainmentMode, point: &Point, polygon: &DrawnPolygon) -> bool {
    match mode {
        ContainmentMode::BoundingBox => containment_test(point, polygon),
        ContainmentMode::Exact => contains_exact(point, polygon),
    }
}
