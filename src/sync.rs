//! Thread-safe report store for hosts that render from another thread.
//!
//! # Features
//!
//! Enable the `sync` feature to use this module:
//!
//! ```toml
//! [dependencies]
//! reportfence = { version = "0.1", features = ["sync"] }
//! ```
//!
//! The engine itself stays single-threaded; only the store it publishes into
//! is shared.

use crate::error::Result;
use crate::store::{MemoryReportStore, ReportSink, ReportStore};
use parking_lot::RwLock;
use reportfence_types::point::ReportPoint;
use reportfence_types::report::Report;
use std::sync::Arc;

/// `Arc<RwLock<MemoryReportStore>>` wrapper.
///
/// Clones share the same store. Readers of the filtered slot proceed
/// concurrently; publications take the write lock.
#[derive(Debug)]
pub struct SharedReportStore<T> {
    inner: Arc<RwLock<MemoryReportStore<T>>>,
}

impl<T> Clone for SharedReportStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> SharedReportStore<T> {
    pub fn new(store: MemoryReportStore<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn with_reports(reports: Vec<ReportPoint<T>>) -> Self {
        Self::new(MemoryReportStore::with_reports(reports))
    }

    /// Snapshot of the filtered slot.
    pub fn filtered_reports(&self) -> Vec<ReportPoint<T>> {
        self.inner.read().filtered_reports().to_vec()
    }

    pub fn filtered_len(&self) -> usize {
        self.inner.read().filtered_reports().len()
    }

    pub fn filtered_writes(&self) -> u64 {
        self.inner.read().filtered_writes()
    }

    pub fn load(&self, reports: Vec<ReportPoint<T>>) {
        self.inner.write().load(reports);
    }

    pub fn add_report(&self, report: ReportPoint<T>) {
        self.inner.write().add_report(report);
    }

    /// Run `f` with shared access to the underlying store.
    pub fn read<R>(&self, f: impl FnOnce(&MemoryReportStore<T>) -> R) -> R {
        f(&self.inner.read())
    }
}

impl SharedReportStore<Report> {
    /// See [`MemoryReportStore::set_status`] for keeping an engine in step.
    pub fn set_status(&self, id: &str, handled: bool) -> Result<()> {
        self.inner.write().set_status(id, handled)
    }

    pub fn toggle_status(&self, id: &str) -> Result<bool> {
        self.inner.write().toggle_status(id)
    }
}

impl<T: Clone> ReportStore<T> for SharedReportStore<T> {
    fn reports(&self) -> Result<Vec<ReportPoint<T>>> {
        self.inner.read().reports()
    }
}

impl<T> ReportSink<T> for SharedReportStore<T> {
    fn set_filtered_reports(&mut self, reports: Vec<ReportPoint<T>>) {
        self.inner.write().set_filtered_reports(reports);
    }
}
