//! Report store abstraction
//!
//! The store owns the full report collection and the filtered slot the
//! presentation layer renders from. The engine reads the collection through
//! [`ReportStore`] and writes its results through [`ReportSink`].

use crate::error::{FilterError, Result};
use reportfence_types::point::ReportPoint;
use reportfence_types::report::Report;

/// Source of the full report collection.
pub trait ReportStore<T> {
    /// Get every report with its coordinates.
    fn reports(&self) -> Result<Vec<ReportPoint<T>>>;
}

/// Destination for filtered results.
pub trait ReportSink<T> {
    /// Replace the filtered slot.
    fn set_filtered_reports(&mut self, reports: Vec<ReportPoint<T>>);
}

impl<T> ReportSink<T> for Vec<ReportPoint<T>> {
    fn set_filtered_reports(&mut self, reports: Vec<ReportPoint<T>>) {
        *self = reports;
    }
}

/// In-memory report store.
///
/// Loading a collection resets the filtered slot to the whole collection.
#[derive(Debug, Clone)]
pub struct MemoryReportStore<T> {
    reports: Vec<ReportPoint<T>>,
    filtered: Vec<ReportPoint<T>>,
    writes: u64,
}

impl<T> Default for MemoryReportStore<T> {
    fn default() -> Self {
        Self {
            reports: Vec::new(),
            filtered: Vec::new(),
            writes: 0,
        }
    }
}

impl<T: Clone> MemoryReportStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reports(reports: Vec<ReportPoint<T>>) -> Self {
        let mut store = Self::new();
        store.load(reports);
        store
    }

    /// Replace the collection; the filtered slot shows everything again.
    pub fn load(&mut self, reports: Vec<ReportPoint<T>>) {
        self.filtered = reports.clone();
        self.reports = reports;
    }

    /// Append a newly submitted report to both the collection and the
    /// filtered slot so it shows up immediately.
    ///
    /// An engine built from this store still holds the old collection and
    /// its next flush overwrites the filtered slot. Pass the report to
    /// [`SpatialFilterEngine::add_report`](crate::SpatialFilterEngine::add_report)
    /// too, or call `refresh`.
    pub fn add_report(&mut self, report: ReportPoint<T>) {
        self.filtered.push(report.clone());
        self.reports.push(report);
    }

    pub fn all_reports(&self) -> &[ReportPoint<T>] {
        &self.reports
    }

    pub fn filtered_reports(&self) -> &[ReportPoint<T>] {
        &self.filtered
    }

    /// Number of times the filtered slot was written through [`ReportSink`].
    pub fn filtered_writes(&self) -> u64 {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl MemoryReportStore<Report> {
    /// Set the handled flag of the report with server id `id`, in both the
    /// collection and the filtered slot.
    ///
    /// Mirror the change with
    /// [`SpatialFilterEngine::set_status`](crate::SpatialFilterEngine::set_status)
    /// or the next flush publishes the old flag.
    pub fn set_status(&mut self, id: &str, handled: bool) -> Result<()> {
        let mut found = false;
        for report in self.reports.iter_mut().chain(self.filtered.iter_mut()) {
            if report.payload.id.as_deref() == Some(id) {
                report.payload.status = handled;
                found = true;
            }
        }

        if !found {
            return Err(FilterError::ObjectNotFound(format!("report '{}'", id)));
        }
        log::debug!("report {} marked {}", id, if handled { "handled" } else { "unhandled" });
        Ok(())
    }

    /// Flip the handled flag and return the new value.
    pub fn toggle_status(&mut self, id: &str) -> Result<bool> {
        let current = self
            .reports
            .iter()
            .find(|r| r.payload.id.as_deref() == Some(id))
            .map(|r| r.payload.status)
            .ok_or_else(|| FilterError::ObjectNotFound(format!("report '{}'", id)))?;
        self.set_status(id, !current)?;
        Ok(!current)
    }
}

impl<T: Clone> ReportStore<T> for MemoryReportStore<T> {
    fn reports(&self) -> Result<Vec<ReportPoint<T>>> {
        Ok(self.reports.clone())
    }
}

impl<T> ReportSink<T> for MemoryReportStore<T> {
    fn set_filtered_reports(&mut self, reports: Vec<ReportPoint<T>>) {
        self.filtered = reports;
        self.writes += 1;
    }
}
