use geo::{Point, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box.
///
/// Represents the rectangular region a drawn polygon covers on the map.
/// This is a wrapper around `geo::Rect`, so corners given in the wrong order
/// are normalised on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// The underlying geometric rectangle
    pub rect: Rect,
}

impl BoundingBox2D {
    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// # Arguments
    ///
    /// * `min_x` - Minimum longitude (west edge)
    /// * `min_y` - Minimum latitude (south edge)
    /// * `max_x` - Maximum longitude (east edge)
    /// * `max_y` - Maximum latitude (north edge)
    ///
    /// # Examples
    ///
    /// ```
    /// use reportfence_types::bbox::BoundingBox2D;
    ///
    /// let bbox = BoundingBox2D::new(34.7, 32.0, 34.9, 32.1);
    /// assert_eq!(bbox.south(), 32.0);
    /// assert_eq!(bbox.east(), 34.9);
    /// ```
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: min_x, y: min_y },
                geo::coord! { x: max_x, y: max_y },
            ),
        }
    }

    /// Create a bounding box from a `geo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    /// Bounding box of a polygon's exterior ring, `None` if the ring is empty.
    pub fn from_polygon(polygon: &Polygon) -> Option<Self> {
        use geo::BoundingRect;
        polygon.bounding_rect().map(Self::from_rect)
    }

    pub fn min_x(&self) -> f64 {
        self.rect.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.rect.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.rect.max().y
    }

    /// Southern edge (minimum latitude).
    pub fn south(&self) -> f64 {
        self.min_y()
    }

    /// Northern edge (maximum latitude).
    pub fn north(&self) -> f64 {
        self.max_y()
    }

    /// Western edge (minimum longitude).
    pub fn west(&self) -> f64 {
        self.min_x()
    }

    /// Eastern edge (maximum longitude).
    pub fn east(&self) -> f64 {
        self.max_x()
    }

    pub fn width(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    /// A box is degenerate when any edge is non-finite or it encloses no area.
    ///
    /// Degenerate boxes contain no points.
    pub fn is_degenerate(&self) -> bool {
        let edges = [self.min_x(), self.min_y(), self.max_x(), self.max_y()];
        if !edges.iter().all(|v| v.is_finite()) {
            return true;
        }
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if a point is contained within this bounding box, edges inclusive.
    ///
    /// Degenerate boxes never contain a point.
    pub fn contains_point(&self, point: &Point) -> bool {
        if self.is_degenerate() {
            return false;
        }
        point.x() >= self.min_x()
            && point.x() <= self.max_x()
            && point.y() >= self.min_y()
            && point.y() <= self.max_y()
    }

    /// Rectangle polygon with the same extent, as a drawing surface would emit
    /// for a box-shaped selection.
    pub fn to_polygon(&self) -> Polygon {
        self.rect.to_polygon()
    }
}
