//! Map overlay helpers: initial map center and heat layer data.

use geo::Point;
use reportfence_types::point::ReportPoint;
use serde::{Deserialize, Serialize};

/// One weighted sample for a heat layer, in `(lat, lon, intensity)` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub intensity: f64,
}

impl HeatPoint {
    pub fn as_triple(&self) -> [f64; 3] {
        [self.latitude, self.longitude, self.intensity]
    }
}

/// Arithmetic mean of the report positions, or `None` for an empty set.
///
/// Reports with non-finite coordinates are left out of the mean.
///
/// # Examples
///
/// ```rust
/// use reportfence::{ReportPoint, overlay::map_center};
///
/// let reports = vec![
///     ReportPoint::from_lat_lon(32.0, 34.0, ()),
///     ReportPoint::from_lat_lon(34.0, 36.0, ()),
/// ];
/// let center = map_center(&reports).unwrap();
/// assert_eq!((center.y(), center.x()), (33.0, 35.0));
/// ```
pub fn map_center<T>(reports: &[ReportPoint<T>]) -> Option<Point> {
    let (sum_x, sum_y, n) = reports
        .iter()
        .filter(|r| r.point.x().is_finite() && r.point.y().is_finite())
        .fold((0.0, 0.0, 0usize), |(sx, sy, n), r| {
            (sx + r.point.x(), sy + r.point.y(), n + 1)
        });

    if n == 0 {
        return None;
    }
    Some(Point::new(sum_x / n as f64, sum_y / n as f64))
}

/// One heat sample per report, each with the same `intensity`.
pub fn heat_points<T>(reports: &[ReportPoint<T>], intensity: f64) -> Vec<HeatPoint> {
    reports
        .iter()
        .map(|r| HeatPoint {
            latitude: r.latitude(),
            longitude: r.longitude(),
            intensity,
        })
        .collect()
}
