//! GeoJSON conversion for drawn polygons and filtered reports.
//!
//! Map widgets hand drawn shapes over as GeoJSON geometries and render
//! marker layers from feature collections.

use crate::compute::validation::validate_polygon;
use crate::error::{FilterError, Result};
use geo::{Coord, LineString, Polygon};
use geojson::{Feature, FeatureCollection, Geometry, Value};
use reportfence_types::point::ReportPoint;
use serde::Serialize;
use serde_json::Map;

fn ring_from_positions(ring: &[Vec<f64>]) -> Result<LineString> {
    let coords = ring
        .iter()
        .map(|position| {
            if position.len() < 2 {
                return Err(FilterError::InvalidInput(
                    "Coordinate must have at least 2 values".to_string(),
                ));
            }
            Ok(Coord {
                x: position[0],
                y: position[1],
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(LineString::from(coords))
}

fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Result<Polygon> {
    let Some((exterior, holes)) = rings.split_first() else {
        return Err(FilterError::InvalidInput(
            "Polygon must have at least one ring".to_string(),
        ));
    };

    let interiors = holes
        .iter()
        .map(|ring| ring_from_positions(ring))
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(ring_from_positions(exterior)?, interiors))
}

/// Parses a GeoJSON Polygon geometry, or a Feature wrapping one, into a
/// `geo::Polygon`. Coordinates outside the geographic range are rejected.
///
/// # Examples
///
/// ```rust
/// use reportfence::geojson::polygon_from_geojson;
///
/// let drawn = r#"{
///     "type": "Feature",
///     "properties": {},
///     "geometry": {
///         "type": "Polygon",
///         "coordinates": [[[34.7, 32.0], [34.9, 32.0], [34.9, 32.1], [34.7, 32.0]]]
///     }
/// }"#;
/// let polygon = polygon_from_geojson(drawn).unwrap();
/// assert_eq!(polygon.exterior().0.len(), 4);
/// ```
pub fn polygon_from_geojson(geojson: &str) -> Result<Polygon> {
    let parsed: geojson::GeoJson = geojson
        .parse()
        .map_err(|e| FilterError::InvalidInput(format!("Failed to parse GeoJSON: {}", e)))?;

    let geometry = match parsed {
        geojson::GeoJson::Geometry(geometry) => geometry,
        geojson::GeoJson::Feature(feature) => feature.geometry.ok_or_else(|| {
            FilterError::InvalidInput("GeoJSON feature has no geometry".to_string())
        })?,
        geojson::GeoJson::FeatureCollection(_) => {
            return Err(FilterError::InvalidInput(
                "Expected a single Polygon, got a FeatureCollection".to_string(),
            ));
        }
    };

    let polygon = match geometry.value {
        Value::Polygon(rings) => polygon_from_rings(&rings)?,
        _ => {
            return Err(FilterError::InvalidInput(
                "GeoJSON geometry is not a Polygon".to_string(),
            ));
        }
    };
    validate_polygon(&polygon)?;
    Ok(polygon)
}

/// Converts a Polygon to a GeoJSON geometry string.
pub fn polygon_to_geojson(polygon: &Polygon) -> Result<String> {
    let ring = |line: &LineString| -> Vec<Vec<f64>> {
        line.coords().map(|coord| vec![coord.x, coord.y]).collect()
    };

    let mut rings = vec![ring(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring));

    let geom = Geometry::new(Value::Polygon(rings));

    serde_json::to_string(&geom).map_err(|e| {
        FilterError::SerializationErrorWithContext(format!("Failed to serialize polygon: {}", e))
    })
}

/// Converts reports to a GeoJSON FeatureCollection of points.
///
/// Each payload is serialized into the feature's properties; payloads that do
/// not serialize to a JSON object are stored under a `"payload"` key.
pub fn reports_to_feature_collection<T: Serialize>(reports: &[ReportPoint<T>]) -> Result<String> {
    let features = reports
        .iter()
        .map(|report| -> Result<Feature> {
            let props = match serde_json::to_value(&report.payload)? {
                serde_json::Value::Object(map) => map,
                other => {
                    let mut map = Map::new();
                    map.insert("payload".to_string(), other);
                    map
                }
            };

            Ok(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    report.point.x(),
                    report.point.y(),
                ]))),
                id: None,
                properties: Some(props),
                foreign_members: None,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    serde_json::to_string(&collection).map_err(|e| {
        FilterError::SerializationErrorWithContext(format!(
            "Failed to serialize feature collection: {}",
            e
        ))
    })
}
