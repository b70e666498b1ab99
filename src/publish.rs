//! Deferred publication of filtered results.
//!
//! The engine never writes to the report store from inside an event handler.
//! Each recompute is queued here and delivered when the host event loop
//! calls [`PublishQueue::drain_into`] on its next turn, so a sink that
//! triggers re-rendering never observes a half-applied event.
//!
//! At most [`MAX_PENDING`] publications are held; when the host falls
//! behind, the oldest are dropped. The newest result is always kept.

use crate::config::PublicationMode;
use crate::store::ReportSink;
use reportfence_types::point::ReportPoint;
use std::collections::VecDeque;

/// Upper bound on undelivered publications.
pub const MAX_PENDING: usize = 32;

/// One recomputed result waiting to be delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct Publication<T> {
    /// Monotonic sequence number, starting at 1
    pub generation: u64,
    pub reports: Vec<ReportPoint<T>>,
}

#[derive(Debug)]
pub struct PublishQueue<T> {
    pending: VecDeque<Publication<T>>,
    mode: PublicationMode,
    generation: u64,
}

impl<T> PublishQueue<T> {
    pub fn new(mode: PublicationMode) -> Self {
        Self {
            pending: VecDeque::new(),
            mode,
            generation: 0,
        }
    }

    /// Queue a result. Returns its generation.
    pub fn push(&mut self, reports: Vec<ReportPoint<T>>) -> u64 {
        self.generation += 1;
        if self.mode == PublicationMode::LatestOnly {
            self.pending.clear();
        } else if self.pending.len() == MAX_PENDING {
            if let Some(dropped) = self.pending.pop_front() {
                log::warn!(
                    "publish queue full, dropping generation {} (flush once per loop turn)",
                    dropped.generation
                );
            }
        }
        self.pending.push_back(Publication {
            generation: self.generation,
            reports,
        });
        self.generation
    }

    /// Deliver every pending publication to `sink`, oldest first.
    ///
    /// Returns the number delivered.
    pub fn drain_into<S: ReportSink<T> + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut count = 0;
        while let Some(publication) = self.pending.pop_front() {
            log::trace!(
                "publishing generation {} ({} reports)",
                publication.generation,
                publication.reports.len()
            );
            sink.set_filtered_reports(publication.reports);
            count += 1;
        }
        count
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
