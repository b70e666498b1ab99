//! Filter configuration
//!
//! Serializable settings for the filter engine, loadable from JSON or TOML
//! while keeping the knob count small.

use crate::error::{FilterError, Result};
use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a polygon decides whether it contains a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentMode {
    /// Point inside the polygon's bounding box, edges inclusive
    #[default]
    BoundingBox,
    /// Point inside or on the boundary of the polygon itself
    Exact,
}

/// What to do with reports whose coordinates are out of range or non-finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReportPolicy {
    /// Keep the report in the collection but never match it against a polygon
    #[default]
    Skip,
    /// Fail the load
    Reject,
}

/// How pending publications are delivered on the next scheduler turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublicationMode {
    /// Deliver every recomputed result in order
    #[default]
    EveryChange,
    /// Deliver only the most recent result
    LatestOnly,
}

/// Filter engine configuration
///
/// # Example
///
/// ```rust
/// use reportfence::{ContainmentMode, FilterConfig};
///
/// let json = r#"{
///     "containment": "exact",
///     "heat_intensity": 0.5
/// }"#;
/// let config = FilterConfig::from_json(json).unwrap();
/// assert_eq!(config.containment, ContainmentMode::Exact);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub containment: ContainmentMode,

    #[serde(default)]
    pub invalid_reports: InvalidReportPolicy,

    #[serde(default)]
    pub publication: PublicationMode,

    /// Weight of each report on the heat overlay, in (0, 1]
    #[serde(default = "FilterConfig::default_heat_intensity")]
    pub heat_intensity: f64,
}

impl FilterConfig {
    const fn default_heat_intensity() -> f64 {
        0.2
    }

    pub fn with_containment(mut self, mode: ContainmentMode) -> Self {
        self.containment = mode;
        self
    }

    pub fn with_invalid_reports(mut self, policy: InvalidReportPolicy) -> Self {
        self.invalid_reports = policy;
        self
    }

    pub fn with_publication(mut self, mode: PublicationMode) -> Self {
        self.publication = mode;
        self
    }

    pub fn with_heat_intensity(mut self, intensity: f64) -> Self {
        assert!(
            intensity.is_finite() && intensity > 0.0 && intensity <= 1.0,
            "Heat intensity must be in (0, 1]"
        );
        self.heat_intensity = intensity;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.heat_intensity.is_finite() {
            return Err("Heat intensity must be finite".to_string());
        }
        if self.heat_intensity <= 0.0 || self.heat_intensity > 1.0 {
            return Err(format!(
                "Heat intensity must be in (0, 1], got {}",
                self.heat_intensity
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: FilterConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: FilterConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a file, picking the format from its extension.
    ///
    /// `.toml` needs the `toml` feature; anything else is read as JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents)
                .map_err(|e| FilterError::InvalidFormat(format!("{}: {}", path.display(), e))),
            #[cfg(not(feature = "toml"))]
            Some("toml") => Err(FilterError::InvalidFormat(format!(
                "{}: TOML configuration requires the `toml` feature",
                path.display()
            ))),
            _ => Ok(Self::from_json(&contents)?),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            containment: ContainmentMode::default(),
            invalid_reports: InvalidReportPolicy::default(),
            publication: PublicationMode::default(),
            heat_intensity: Self::default_heat_intensity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.containment, ContainmentMode::BoundingBox);
        assert_eq!(config.invalid_reports, InvalidReportPolicy::Skip);
        assert_eq!(config.publication, PublicationMode::EveryChange);
        assert_eq!(config.heat_intensity, 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip_and_partial_input() {
        let config: FilterConfig = FilterConfig::from_json("{}").unwrap();
        assert_eq!(config, FilterConfig::default());

        let custom = FilterConfig::default()
            .with_containment(ContainmentMode::Exact)
            .with_publication(PublicationMode::LatestOnly);
        let json = custom.to_json().unwrap();
        assert_eq!(FilterConfig::from_json(&json).unwrap(), custom);
    }

    #[test]
    fn test_rejects_bad_intensity() {
        assert!(FilterConfig::from_json(r#"{"heat_intensity": 0.0}"#).is_err());
        assert!(FilterConfig::from_json(r#"{"heat_intensity": 1.5}"#).is_err());
        assert!(FilterConfig::from_json(r#"{"containment": "polygonal"}"#).is_err());
    }

    #[test]
    #[should_panic(expected = "Heat intensity must be in (0, 1]")]
    fn test_with_heat_intensity_panics_out_of_range() {
        let _ = FilterConfig::default().with_heat_intensity(-1.0);
    }

    #[test]
    fn test_from_path_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"invalid_reports": "reject"}}"#).unwrap();

        let config = FilterConfig::from_path(file.path()).unwrap();
        assert_eq!(config.invalid_reports, InvalidReportPolicy::Reject);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = FilterConfig::from_path("/nonexistent/reportfence.json").unwrap_err();
        assert!(matches!(err, FilterError::Io(_)));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_roundtrip() {
        let config = FilterConfig::default().with_heat_intensity(0.8);
        let text = config.to_toml().unwrap();
        assert_eq!(FilterConfig::from_toml(&text).unwrap(), config);
    }
}
