//! Compute layer: containment predicates, indexing and format conversion.
//!
//! Everything here is pure with respect to engine state. The engine owns
//! the polygon set and report collection and calls into this layer to
//! evaluate them.

pub mod containment;
pub mod index;
pub mod validation;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use containment::{containment_test, contains, contains_exact};
pub use index::ReportIndex;
