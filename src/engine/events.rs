//! Events emitted by the drawing surface and what handling them did.

use geo::Polygon;
use reportfence_types::polygon::PolygonId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// New shape for an existing polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonEdit {
    pub id: PolygonId,
    pub geometry: Polygon,
}

impl PolygonEdit {
    pub fn new(id: PolygonId, geometry: Polygon) -> Self {
        Self { id, geometry }
    }
}

/// A drawing-surface event.
///
/// Edit and delete events must echo the ids handed out when the polygons
/// were created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawEvent {
    Created { geometry: Polygon },
    Edited { layers: Vec<PolygonEdit> },
    Deleted { layers: Vec<PolygonId> },
}

/// Result of an edit or delete batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Entries that matched a stored polygon
    pub applied: usize,
    /// Ids that matched nothing and were skipped
    pub ignored: SmallVec<[PolygonId; 4]>,
}

impl MutationOutcome {
    /// True when the polygon set was left untouched.
    pub fn is_noop(&self) -> bool {
        self.applied == 0
    }
}

/// Result of handling one `DrawEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Created(PolygonId),
    Edited(MutationOutcome),
    Deleted(MutationOutcome),
}
