//! Polygon geofencing for geolocated incident reports.
//!
//! Users draw polygons on a map; the engine keeps the subset of reports that
//! fall inside at least one of them and hands it to the report store on the
//! next turn of the host event loop.
//!
//! ## Features
//! - **Draw-event handling**: create, edit and delete polygons by id
//! - **Containment**: bounding-box (default) or exact polygon tests, edges inclusive
//! - **Indexing**: report positions in an R*-tree, rebuilt per report load
//! - **Deferred publication**: results queue until the host calls `flush`
//! - **Attribute filters**: address, keyword, time window, handled status
//!
//! ```rust
//! use reportfence::{BoundingBox2D, MemoryReportStore, Report, SpatialFilterEngine, FilterConfig};
//!
//! let mut store = MemoryReportStore::with_reports(vec![
//!     Report::new("Broken light", 32.08, 34.78).into_report_point(),
//!     Report::new("Flooding", 40.0, -75.0).into_report_point(),
//! ]);
//! let mut engine = SpatialFilterEngine::from_store(&store, FilterConfig::default())?;
//!
//! let zone = BoundingBox2D::new(34.7, 32.0, 34.9, 32.1);
//! engine.on_polygon_created(zone.to_polygon());
//!
//! // Next loop turn: publish into the store
//! engine.flush(&mut store);
//! assert_eq!(store.filtered_reports().len(), 1);
//! # Ok::<(), reportfence::FilterError>(())
//! ```

pub mod address;
pub mod attributes;
pub mod builder;
pub mod compute;
pub mod config;
pub mod engine;
pub mod error;
pub mod overlay;
pub mod publish;
pub mod store;

#[cfg(feature = "sync")]
pub mod sync;

pub use builder::EngineBuilder;
pub use engine::{
    DrawEvent, EventOutcome, MutationOutcome, PolygonEdit, PolygonSet, SpatialFilterEngine,
};
pub use error::{FilterError, Result};

pub use compute::containment_test;
pub use compute::validation;

#[cfg(feature = "geojson")]
pub use compute::geojson;

pub use config::{ContainmentMode, FilterConfig, InvalidReportPolicy, PublicationMode};

pub use attributes::{ReportQuery, Viewer};
pub use overlay::HeatPoint;
pub use publish::{Publication, PublishQueue};
pub use store::{MemoryReportStore, ReportSink, ReportStore};

#[cfg(feature = "sync")]
pub use sync::SharedReportStore;

pub use geo::{Point, Polygon};

/// Re-export of the shared data types crate.
pub use reportfence_types as types;
pub use reportfence_types::bbox::BoundingBox2D;
pub use reportfence_types::point::ReportPoint;
pub use reportfence_types::polygon::{DrawnPolygon, PolygonId};
pub use reportfence_types::report::Report;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{EngineBuilder, FilterError, Result, SpatialFilterEngine};

    pub use geo::{Point, Polygon};

    pub use crate::{BoundingBox2D, PolygonId, Report, ReportPoint};

    pub use crate::{DrawEvent, EventOutcome, PolygonEdit};

    pub use crate::{ContainmentMode, FilterConfig};

    pub use crate::{MemoryReportStore, ReportSink, ReportStore};
}
