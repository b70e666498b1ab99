//! Engine builder for flexible configuration
//!
//! This module provides a builder pattern for creating filter engines with
//! an explicit configuration, an optional configuration file and an initial
//! report collection.

use crate::config::{ContainmentMode, FilterConfig, InvalidReportPolicy, PublicationMode};
use crate::engine::SpatialFilterEngine;
use crate::error::Result;
use crate::store::ReportStore;
use reportfence_types::point::ReportPoint;
use std::path::PathBuf;

/// Builder for a [`SpatialFilterEngine`].
#[derive(Debug)]
pub struct EngineBuilder<T> {
    config: FilterConfig,
    config_path: Option<PathBuf>,
    reports: Vec<ReportPoint<T>>,
}

impl<T: Clone> EngineBuilder<T> {
    /// Create a new builder with default configuration and no reports.
    pub fn new() -> Self {
        Self {
            config: FilterConfig::default(),
            config_path: None,
            reports: Vec::new(),
        }
    }

    /// Set the engine configuration.
    pub fn config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    /// Read the configuration from a JSON or TOML file when building.
    /// Takes precedence over [`EngineBuilder::config`].
    pub fn config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn containment(mut self, mode: ContainmentMode) -> Self {
        self.config = self.config.with_containment(mode);
        self
    }

    pub fn publication(mut self, mode: PublicationMode) -> Self {
        self.config = self.config.with_publication(mode);
        self
    }

    pub fn invalid_reports(mut self, policy: InvalidReportPolicy) -> Self {
        self.config = self.config.with_invalid_reports(policy);
        self
    }

    /// Set the initial report collection.
    pub fn reports(mut self, reports: Vec<ReportPoint<T>>) -> Self {
        self.reports = reports;
        self
    }

    /// Append one report to the initial collection.
    pub fn report(mut self, report: ReportPoint<T>) -> Self {
        self.reports.push(report);
        self
    }

    /// Take the initial collection from a report store.
    pub fn from_store<S: ReportStore<T> + ?Sized>(mut self, store: &S) -> Result<Self> {
        self.reports = store.reports()?;
        Ok(self)
    }

    /// Build the engine. Loads the configuration file if one was given.
    pub fn build(self) -> Result<SpatialFilterEngine<T>> {
        let config = match self.config_path {
            Some(path) => FilterConfig::from_path(path)?,
            None => self.config,
        };
        SpatialFilterEngine::with_config(self.reports, config)
    }
}

impl<T: Clone> Default for EngineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
