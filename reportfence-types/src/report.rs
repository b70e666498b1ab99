use crate::point::ReportPoint;
use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};

/// A user-submitted incident report.
///
/// Field names follow the dashboard's JSON records (`_id`, `safetyLevel`,
/// `dateTime`, ...). `status` is the handled flag administrators toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Server-assigned identifier, absent until the report is stored
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Short description of the incident
    pub value: String,
    /// Human-readable address
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_level: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// When the incident happened, as an RFC 3339 timestamp on the wire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
    /// `true` once an administrator has handled the report
    #[serde(default)]
    pub status: bool,
    /// Path of the uploaded photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Report {
    /// Create an unhandled report with only the required fields set.
    pub fn new(value: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: None,
            value: value.into(),
            location: String::new(),
            safety_level: None,
            latitude,
            longitude,
            date_time: None,
            status: false,
            image: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_safety_level(mut self, level: impl Into<String>) -> Self {
        self.safety_level = Some(level.into());
        self
    }

    pub fn with_date_time(mut self, at: DateTime<Utc>) -> Self {
        self.date_time = Some(at);
        self
    }

    pub fn with_status(mut self, handled: bool) -> Self {
        self.status = handled;
        self
    }

    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image = Some(path.into());
        self
    }

    /// Position as a `geo::Point` (`x` = longitude, `y` = latitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    pub fn is_handled(&self) -> bool {
        self.status
    }

    /// Stable key for map markers: the server id, or `"{lat}-{lon}"`.
    pub fn marker_key(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}-{}", self.latitude, self.longitude),
        }
    }

    pub fn into_report_point(self) -> ReportPoint<Report> {
        ReportPoint::new(self.point(), self)
    }
}

impl From<Report> for ReportPoint<Report> {
    fn from(report: Report) -> Self {
        report.into_report_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_dashboard_record() {
        let json = r#"{
            "_id": "65f1c0",
            "value": "Broken street light",
            "location": "Herzl St 12, Tel Aviv 6100000",
            "safetyLevel": "3",
            "latitude": 32.08,
            "longitude": 34.78,
            "status": false,
            "image": "/uploads/65f1c0.jpg"
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.id.as_deref(), Some("65f1c0"));
        assert_eq!(report.safety_level.as_deref(), Some("3"));
        assert!(!report.is_handled());
        assert!(report.date_time.is_none());
        assert_eq!(report.point(), Point::new(34.78, 32.08));
    }

    #[test]
    fn test_iso_date_time_roundtrip() {
        let json = r#"{
            "_id": "65f1c1",
            "value": "Fallen tree",
            "latitude": 31.77,
            "longitude": 35.21,
            "dateTime": "2024-03-01T10:00:00.000Z"
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        let expected: DateTime<Utc> = "2024-03-01T10:00:00Z".parse().unwrap();
        assert_eq!(report.date_time, Some(expected));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["dateTime"], "2024-03-01T10:00:00Z");
    }

    #[test]
    fn test_date_time_with_offset_is_normalized() {
        let json = r#"{"value": "x", "latitude": 0, "longitude": 0, "dateTime": "2024-03-01T12:00:00+02:00"}"#;
        let report: Report = serde_json::from_str(json).unwrap();
        let expected: DateTime<Utc> = "2024-03-01T10:00:00Z".parse().unwrap();
        assert_eq!(report.date_time, Some(expected));
    }

    #[test]
    fn test_malformed_date_time_is_rejected() {
        let json = r#"{"value": "x", "latitude": 0, "longitude": 0, "dateTime": "yesterday"}"#;
        assert!(serde_json::from_str::<Report>(json).is_err());
    }

    #[test]
    fn test_marker_key_fallback() {
        let report = Report::new("Flooding", 40.0, -75.0);
        assert_eq!(report.marker_key(), "40--75");
        assert_eq!(report.with_id("abc").marker_key(), "abc");
    }

    #[test]
    fn test_into_report_point() {
        let rp: ReportPoint<Report> = Report::new("x", 1.5, 2.5).into();
        assert_eq!(rp.latitude(), 1.5);
        assert_eq!(rp.longitude(), 2.5);
        assert_eq!(rp.payload.value, "x");
    }
}
