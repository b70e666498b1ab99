//! R-tree over report positions.
//!
//! The index stores slot numbers into the engine's report collection rather
//! than the reports themselves, so payloads never need to be cloned into the
//! tree.

use crate::compute::containment;
use crate::config::ContainmentMode;
use geo::Point;
use reportfence_types::point::ReportPoint;
use reportfence_types::polygon::DrawnPolygon;
use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};

type IndexedSlot = GeomWithData<[f64; 2], usize>;

/// Spatial index over the positions of a report collection.
#[derive(Debug, Default)]
pub struct ReportIndex {
    tree: RTree<IndexedSlot>,
    len: usize,
}

impl ReportIndex {
    /// Bulk-load the positions of `reports`.
    ///
    /// `indexable` decides per slot whether a report takes part in matching;
    /// skipped reports stay addressable by slot but are never returned.
    pub fn build<T>(reports: &[ReportPoint<T>], indexable: impl Fn(usize) -> bool) -> Self {
        let entries: Vec<IndexedSlot> = reports
            .iter()
            .enumerate()
            .filter(|(slot, _)| indexable(*slot))
            .map(|(slot, report)| GeomWithData::new([report.point.x(), report.point.y()], slot))
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            len: reports.len(),
        }
    }

    /// Append the next slot. Returns its number.
    pub fn push(&mut self, point: &Point, indexable: bool) -> usize {
        let slot = self.len;
        self.len += 1;
        if indexable {
            self.tree.insert(GeomWithData::new([point.x(), point.y()], slot));
        }
        slot
    }

    /// Number of report slots the index was built for, indexed or not.
    pub fn slots(&self) -> usize {
        self.len
    }

    /// Number of reports that take part in matching.
    pub fn indexed(&self) -> usize {
        self.tree.size()
    }

    /// Mark in `mask` every slot whose position `polygon` contains.
    ///
    /// Returns how many slots were newly marked.
    pub fn mark_contained(
        &self,
        polygon: &DrawnPolygon,
        mode: ContainmentMode,
        mask: &mut [bool],
    ) -> usize {
        let Some(bounds) = polygon.bounds() else {
            return 0;
        };
        if bounds.is_degenerate() {
            return 0;
        }

        let envelope = AABB::from_corners(
            [bounds.min_x(), bounds.min_y()],
            [bounds.max_x(), bounds.max_y()],
        );

        let mut marked = 0;
        for entry in self.tree.locate_in_envelope(&envelope) {
            let slot = entry.data;
            if mask[slot] {
                continue;
            }
            let [x, y] = *entry.geom();
            if mode == ContainmentMode::Exact
                && !containment::contains_exact(&Point::new(x, y), polygon)
            {
                continue;
            }
            mask[slot] = true;
            marked += 1;
        }
        marked
    }
}
