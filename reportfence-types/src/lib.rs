//! # reportfence-types
//!
//! Core data types shared by the reportfence filter engine and its
//! collaborators:
//!
//! - **Bounding boxes**: `BoundingBox2D`, the containment region of a drawn polygon
//! - **Polygons**: `PolygonId`, `DrawnPolygon`
//! - **Reports**: `Report`, `ReportPoint`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives. Points follow the `geo` convention of
//! `x = longitude`, `y = latitude`.
//!
//! ## Examples
//!
//! ```rust
//! use reportfence_types::bbox::BoundingBox2D;
//! use reportfence_types::point::ReportPoint;
//! use geo::Point;
//!
//! let report = ReportPoint::new(Point::new(34.78, 32.08), "pothole");
//!
//! let tel_aviv = BoundingBox2D::new(34.7, 32.0, 34.9, 32.1);
//! assert!(tel_aviv.contains_point(&report.point));
//! ```

pub mod bbox;
pub mod point;
pub mod polygon;
pub mod report;
