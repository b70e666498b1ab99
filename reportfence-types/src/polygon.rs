use crate::bbox::BoundingBox2D;
use geo::Polygon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a polygon when it is drawn.
///
/// The drawing surface echoes it back on edit and delete events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonId(pub u64);

impl PolygonId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "polygon-{}", self.0)
    }
}

/// A user-drawn closed region and its cached bounding box.
///
/// `bounds` is `None` when the exterior ring is empty. Such a polygon is kept
/// in the set like any other but contains no points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnPolygon {
    id: PolygonId,
    geometry: Polygon,
    bounds: Option<BoundingBox2D>,
}

impl DrawnPolygon {
    pub fn new(id: PolygonId, geometry: Polygon) -> Self {
        let bounds = BoundingBox2D::from_polygon(&geometry);
        Self {
            id,
            geometry,
            bounds,
        }
    }

    /// Rectangle-shaped polygon covering `bbox`.
    pub fn from_bbox(id: PolygonId, bbox: &BoundingBox2D) -> Self {
        Self::new(id, bbox.to_polygon())
    }

    pub fn id(&self) -> PolygonId {
        self.id
    }

    pub fn geometry(&self) -> &Polygon {
        &self.geometry
    }

    pub fn bounds(&self) -> Option<&BoundingBox2D> {
        self.bounds.as_ref()
    }

    /// True when the polygon can never contain a point.
    pub fn is_degenerate(&self) -> bool {
        self.bounds.as_ref().is_none_or(BoundingBox2D::is_degenerate)
    }

    /// Swap in a new shape, keeping the identifier.
    pub fn reshape(&mut self, geometry: Polygon) {
        self.bounds = BoundingBox2D::from_polygon(&geometry);
        self.geometry = geometry;
    }
}
