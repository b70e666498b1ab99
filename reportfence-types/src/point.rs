use geo::Point;
use serde::{Deserialize, Serialize};

/// A geographic point with an opaque payload attached.
///
/// The filter engine only ever looks at `point`; the payload travels along
/// untouched so the presentation layer gets back whatever it handed in
/// (a full report record, a bare identifier, ...).
///
/// # Examples
///
/// ```
/// use reportfence_types::point::ReportPoint;
/// use geo::Point;
///
/// let marker = ReportPoint::from_lat_lon(32.08, 34.78, "r-1");
/// assert_eq!(marker.latitude(), 32.08);
/// assert_eq!(marker.longitude(), 34.78);
/// assert_eq!(marker.point, Point::new(34.78, 32.08));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPoint<T> {
    /// Report position (`x` = longitude, `y` = latitude)
    pub point: Point<f64>,
    /// Caller-owned data carried alongside the position
    pub payload: T,
}

impl<T> ReportPoint<T> {
    pub fn new(point: Point<f64>, payload: T) -> Self {
        Self { point, payload }
    }

    /// Create a report point from latitude/longitude order, as map widgets
    /// and report records usually express coordinates.
    pub fn from_lat_lon(latitude: f64, longitude: f64, payload: T) -> Self {
        Self::new(Point::new(longitude, latitude), payload)
    }

    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    pub fn longitude(&self) -> f64 {
        self.point.x()
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Replace the payload, keeping the position.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReportPoint<U> {
        ReportPoint {
            point: self.point,
            payload: f(self.payload),
        }
    }
}
