//! Spatial filter engine.
//!
//! Keeps the set of drawn polygons and, after every mutation, recomputes
//! which reports fall inside at least one of them. With no polygons drawn
//! the filter is inactive and every report passes.
//!
//! ```rust
//! use reportfence::{BoundingBox2D, ReportPoint, SpatialFilterEngine};
//!
//! let mut engine = SpatialFilterEngine::new(vec![
//!     ReportPoint::from_lat_lon(32.08, 34.78, "pothole"),
//!     ReportPoint::from_lat_lon(40.0, -75.0, "flooding"),
//! ]);
//!
//! let zone = engine.on_polygon_created(BoundingBox2D::new(34.7, 32.0, 34.9, 32.1).to_polygon());
//! assert_eq!(engine.filtered_reports().len(), 1);
//!
//! engine.on_polygon_deleted(&[zone]);
//! assert_eq!(engine.filtered_reports().len(), 2);
//!
//! // Results reach the store on the next turn of the host loop
//! let mut shown = Vec::new();
//! assert_eq!(engine.flush(&mut shown), 2);
//! assert_eq!(shown.len(), 2);
//! ```

pub mod events;
pub mod polygons;

pub use events::{DrawEvent, EventOutcome, MutationOutcome, PolygonEdit};
pub use polygons::PolygonSet;

use crate::compute::containment;
use crate::compute::index::ReportIndex;
use crate::compute::validation::{Screening, position_issue, screen_report, screen_reports};
use crate::config::FilterConfig;
use crate::error::{FilterError, Result};
use crate::publish::PublishQueue;
use crate::store::{ReportSink, ReportStore};
use geo::{Point, Polygon};
use reportfence_types::point::ReportPoint;
use reportfence_types::polygon::PolygonId;
use reportfence_types::report::Report;

pub struct SpatialFilterEngine<T> {
    config: FilterConfig,
    polygons: PolygonSet,
    reports: Vec<ReportPoint<T>>,
    index: ReportIndex,
    filtered: Vec<ReportPoint<T>>,
    outbox: PublishQueue<T>,
}

impl<T: Clone> SpatialFilterEngine<T> {
    /// Engine with default configuration over `reports`.
    ///
    /// Reports with invalid coordinates are kept but never match a polygon.
    pub fn new(reports: Vec<ReportPoint<T>>) -> Self {
        let screening = screen_reports(&reports);
        let mut engine = Self::empty(FilterConfig::default());
        engine.install_reports(reports, &screening);
        engine
    }

    /// Engine with an explicit configuration.
    ///
    /// Fails if the configuration is invalid, or if it rejects invalid
    /// reports and one is present.
    pub fn with_config(reports: Vec<ReportPoint<T>>, config: FilterConfig) -> Result<Self> {
        config.validate().map_err(FilterError::InvalidInput)?;
        let screening = screen_reports(&reports).enforce(config.invalid_reports)?;

        let mut engine = Self::empty(config);
        engine.install_reports(reports, &screening);
        Ok(engine)
    }

    /// Engine over the collection currently held by `store`.
    pub fn from_store<S: ReportStore<T> + ?Sized>(store: &S, config: FilterConfig) -> Result<Self> {
        Self::with_config(store.reports()?, config)
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Replace the report collection, keeping the drawn polygons, and
    /// recompute.
    pub fn load_reports(&mut self, reports: Vec<ReportPoint<T>>) -> Result<()> {
        let screening = screen_reports(&reports).enforce(self.config.invalid_reports)?;
        self.install_reports(reports, &screening);
        self.recompute();
        Ok(())
    }

    /// Append a newly submitted report and recompute, so the report shows
    /// up in the next publication when it passes the filter.
    ///
    /// Under the `reject` policy a report with unusable coordinates is
    /// refused and nothing changes.
    pub fn add_report(&mut self, report: ReportPoint<T>) -> Result<()> {
        let slot = self.reports.len();
        let screening = screen_report(slot, &report).enforce(self.config.invalid_reports)?;
        for skipped in &screening.skipped {
            log::warn!("{} will never match a polygon", skipped);
        }

        self.index.push(&report.point, screening.is_clean());
        self.reports.push(report);
        log::debug!("report #{} added ({} total)", slot, self.reports.len());
        self.recompute();
        Ok(())
    }

    /// Patch the payloads `select` picks with `update`, in both the
    /// collection and the current filtered set, and publish the result.
    ///
    /// Positions are left alone, so filter membership does not change.
    /// Returns how many reports of the collection were patched.
    pub fn update_reports(
        &mut self,
        mut select: impl FnMut(&T) -> bool,
        mut update: impl FnMut(&mut T),
    ) -> usize {
        let mut patched = 0;
        for report in self.reports.iter_mut().filter(|r| select(&r.payload)) {
            update(&mut report.payload);
            patched += 1;
        }
        if patched == 0 {
            return 0;
        }

        for report in self.filtered.iter_mut().filter(|r| select(&r.payload)) {
            update(&mut report.payload);
        }
        log::debug!("{} report(s) updated", patched);
        self.outbox.push(self.filtered.clone());
        patched
    }

    /// Re-read the collection from `store` and recompute.
    pub fn refresh<S: ReportStore<T> + ?Sized>(&mut self, store: &S) -> Result<()> {
        self.load_reports(store.reports()?)
    }

    /// Append a drawn polygon and recompute. Returns the id the drawing
    /// surface must echo on later edits and deletes.
    pub fn on_polygon_created(&mut self, geometry: Polygon) -> PolygonId {
        let id = self.polygons.insert(geometry);
        if self.polygons.get(id).is_some_and(|p| p.is_degenerate()) {
            log::debug!("{} is degenerate and will match no reports", id);
        }
        log::debug!("{} created ({} active)", id, self.polygons.len());
        self.recompute();
        id
    }

    /// Replace the shapes of existing polygons in place and recompute.
    ///
    /// Edits naming unknown ids are skipped. An empty batch, or one in which
    /// nothing matched, leaves the engine untouched and publishes nothing.
    pub fn on_polygon_edited(&mut self, edits: Vec<PolygonEdit>) -> MutationOutcome {
        let mut outcome = MutationOutcome::default();
        if edits.is_empty() {
            return outcome;
        }

        for edit in edits {
            if self.polygons.reshape(edit.id, edit.geometry) {
                outcome.applied += 1;
            } else {
                log::debug!("edit for unknown {} ignored", edit.id);
                outcome.ignored.push(edit.id);
            }
        }

        if !outcome.is_noop() {
            log::debug!("{} polygon(s) edited", outcome.applied);
            self.recompute();
        }
        outcome
    }

    /// Remove polygons by id and recompute.
    ///
    /// Removing the last polygon deactivates the filter: every report passes
    /// again.
    pub fn on_polygon_deleted(&mut self, ids: &[PolygonId]) -> MutationOutcome {
        let mut outcome = MutationOutcome::default();

        for &id in ids {
            if self.polygons.remove(id).is_some() {
                outcome.applied += 1;
            } else {
                log::debug!("delete for unknown {} ignored", id);
                outcome.ignored.push(id);
            }
        }

        if !outcome.is_noop() {
            log::debug!(
                "{} polygon(s) deleted ({} active)",
                outcome.applied,
                self.polygons.len()
            );
            self.recompute();
        }
        outcome
    }

    /// Dispatch a drawing-surface event.
    pub fn handle(&mut self, event: DrawEvent) -> EventOutcome {
        match event {
            DrawEvent::Created { geometry } => EventOutcome::Created(self.on_polygon_created(geometry)),
            DrawEvent::Edited { layers } => EventOutcome::Edited(self.on_polygon_edited(layers)),
            DrawEvent::Deleted { layers } => EventOutcome::Deleted(self.on_polygon_deleted(&layers)),
        }
    }

    /// Drop every polygon and show all reports.
    pub fn reset(&mut self) {
        if self.polygons.is_empty() {
            return;
        }
        self.polygons.clear();
        self.recompute();
    }

    /// Whether `point` passes the current filter.
    pub fn matches(&self, point: &Point) -> bool {
        if self.polygons.is_empty() {
            return true;
        }
        if position_issue(point).is_some() {
            return false;
        }
        self.polygons
            .iter()
            .any(|polygon| containment::contains(self.config.containment, point, polygon))
    }

    pub fn filtered_reports(&self) -> &[ReportPoint<T>] {
        &self.filtered
    }

    pub fn all_reports(&self) -> &[ReportPoint<T>] {
        &self.reports
    }

    pub fn polygons(&self) -> &PolygonSet {
        &self.polygons
    }

    /// True while at least one polygon is drawn.
    pub fn is_filter_active(&self) -> bool {
        !self.polygons.is_empty()
    }

    pub fn pending_publications(&self) -> usize {
        self.outbox.len()
    }

    /// Deliver queued results to `sink`. Call once per turn of the host
    /// event loop, after the event that produced them has returned.
    ///
    /// Every recompute queues a copy of the filtered set. Until this is
    /// called the backlog grows, up to [`MAX_PENDING`](crate::publish::MAX_PENDING)
    /// copies in `every_change` mode; older ones are then dropped.
    pub fn flush<S: ReportSink<T> + ?Sized>(&mut self, sink: &mut S) -> usize {
        self.outbox.drain_into(sink)
    }

    fn empty(config: FilterConfig) -> Self {
        Self {
            outbox: PublishQueue::new(config.publication),
            config,
            polygons: PolygonSet::new(),
            reports: Vec::new(),
            index: ReportIndex::default(),
            filtered: Vec::new(),
        }
    }

    fn install_reports(&mut self, reports: Vec<ReportPoint<T>>, screening: &Screening) {
        self.index = ReportIndex::build(&reports, |slot| !screening.is_skipped(slot));

        for skipped in &screening.skipped {
            log::warn!("{} will never match a polygon", skipped);
        }
        log::info!(
            "loaded {} report(s), {} unmatchable",
            reports.len(),
            screening.skipped.len()
        );

        self.filtered = reports.clone();
        self.reports = reports;
    }

    fn recompute(&mut self) {
        self.filtered = if self.polygons.is_empty() {
            self.reports.clone()
        } else {
            let mut mask = vec![false; self.reports.len()];
            for polygon in &self.polygons {
                self.index
                    .mark_contained(polygon, self.config.containment, &mut mask);
            }
            self.reports
                .iter()
                .zip(&mask)
                .filter(|(_, keep)| **keep)
                .map(|(report, _)| report.clone())
                .collect()
        };

        log::debug!(
            "filter recomputed: {}/{} reports across {} polygon(s)",
            self.filtered.len(),
            self.reports.len(),
            self.polygons.len()
        );
        self.outbox.push(self.filtered.clone());
    }
}

impl<T: Clone> Default for SpatialFilterEngine<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SpatialFilterEngine<Report> {
    /// Set the handled flag of the report with server id `id`.
    ///
    /// Call alongside [`MemoryReportStore::set_status`](crate::MemoryReportStore::set_status)
    /// so later publications carry the new flag.
    pub fn set_status(&mut self, id: &str, handled: bool) -> Result<()> {
        let patched = self.update_reports(
            |report| report.id.as_deref() == Some(id),
            |report| report.status = handled,
        );
        if patched == 0 {
            return Err(FilterError::ObjectNotFound(format!("report '{}'", id)));
        }
        Ok(())
    }
}
