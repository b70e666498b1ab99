//! Coordinate checks for report positions and drawn shapes.
//!
//! Reports with unusable positions are screened once per load according to
//! the configured [`InvalidReportPolicy`]: skipped reports stay in the
//! collection but never enter the spatial index.

use crate::config::InvalidReportPolicy;
use crate::error::{FilterError, Result};
use geo::{Point, Polygon};
use reportfence_types::point::ReportPoint;
use std::fmt;

/// What is wrong with a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateIssue {
    /// Latitude or longitude is NaN or infinite
    NonFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl fmt::Display for CoordinateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateIssue::NonFinite => write!(f, "coordinate is not a finite number"),
            CoordinateIssue::LatitudeOutOfRange(lat) => {
                write!(f, "latitude {} outside [-90, 90]", lat)
            }
            CoordinateIssue::LongitudeOutOfRange(lon) => {
                write!(f, "longitude {} outside [-180, 180]", lon)
            }
        }
    }
}

/// The issue with `point` (`x` = longitude, `y` = latitude), if any.
///
/// ```
/// use reportfence::validation::{position_issue, CoordinateIssue};
/// use geo::Point;
///
/// assert_eq!(position_issue(&Point::new(34.78, 32.08)), None);
/// assert_eq!(
///     position_issue(&Point::new(34.78, 91.0)),
///     Some(CoordinateIssue::LatitudeOutOfRange(91.0))
/// );
/// ```
pub fn position_issue(point: &Point) -> Option<CoordinateIssue> {
    let (lon, lat) = (point.x(), point.y());
    if !lon.is_finite() || !lat.is_finite() {
        Some(CoordinateIssue::NonFinite)
    } else if !(-90.0..=90.0).contains(&lat) {
        Some(CoordinateIssue::LatitudeOutOfRange(lat))
    } else if !(-180.0..=180.0).contains(&lon) {
        Some(CoordinateIssue::LongitudeOutOfRange(lon))
    } else {
        None
    }
}

/// A report left out of matching.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedReport {
    /// Position in the loaded collection
    pub slot: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub issue: CoordinateIssue,
}

impl fmt::Display for SkippedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "report #{} at ({}, {}): {}",
            self.slot, self.latitude, self.longitude, self.issue
        )
    }
}

/// Reports of a collection whose positions cannot be matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screening {
    pub skipped: Vec<SkippedReport>,
}

impl Screening {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Whether the report at `slot` was screened out.
    pub fn is_skipped(&self, slot: usize) -> bool {
        self.skipped.binary_search_by_key(&slot, |s| s.slot).is_ok()
    }

    /// Apply `policy`: `Skip` keeps the screening as is, `Reject` fails on the
    /// first bad report.
    pub fn enforce(self, policy: InvalidReportPolicy) -> Result<Self> {
        match (policy, self.skipped.first()) {
            (InvalidReportPolicy::Reject, Some(first)) => Err(FilterError::InvalidInput(format!(
                "{} (rejected by invalid-report policy)",
                first
            ))),
            _ => Ok(self),
        }
    }
}

/// Screen one report that will occupy `slot`.
pub fn screen_report<T>(slot: usize, report: &ReportPoint<T>) -> Screening {
    let skipped = position_issue(&report.point)
        .map(|issue| SkippedReport {
            slot,
            latitude: report.latitude(),
            longitude: report.longitude(),
            issue,
        })
        .into_iter()
        .collect();
    Screening { skipped }
}

/// Screen every report in `reports`, in slot order.
pub fn screen_reports<T>(reports: &[ReportPoint<T>]) -> Screening {
    let skipped = reports
        .iter()
        .enumerate()
        .flat_map(|(slot, report)| screen_report(slot, report).skipped)
        .collect();
    Screening { skipped }
}

/// Reject drawn shapes whose vertices are not on the globe.
///
/// Ring 0 is the outline; holes follow in order.
pub fn validate_polygon(polygon: &Polygon) -> Result<()> {
    let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
    for (ring, line) in rings.enumerate() {
        for (vertex, coord) in line.coords().enumerate() {
            if let Some(issue) = position_issue(&Point::from(*coord)) {
                return Err(FilterError::InvalidInput(format!(
                    "drawn polygon ring {} vertex {}: {}",
                    ring, vertex, issue
                )));
            }
        }
    }
    Ok(())
}
