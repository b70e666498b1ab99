//! Attribute filters over report records.
//!
//! Complements the spatial filter with the table view's search form:
//! address text, time window, free keyword and handled status.

use reportfence_types::point::ReportPoint;
use reportfence_types::report::Report;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Search criteria applied in order: address, date range, keyword, status.
///
/// Unset criteria do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Substring of the report's address
    #[serde(default)]
    pub address: Option<String>,
    /// Inclusive time window; reports without a timestamp never match
    #[serde(default)]
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Substring of either the address or the description
    #[serde(default)]
    pub keyword: Option<String>,
    /// Handled flag to match
    #[serde(default)]
    pub status: Option<bool>,
}

impl ReportQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, text: impl Into<String>) -> Self {
        self.address = Some(text.into());
        self
    }

    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.date_range = Some((from, to));
        self
    }

    pub fn keyword(mut self, text: impl Into<String>) -> Self {
        self.keyword = Some(text.into());
        self
    }

    pub fn status(mut self, handled: bool) -> Self {
        self.status = Some(handled);
        self
    }

    /// True when no criterion would filter anything.
    pub fn is_empty(&self) -> bool {
        blank(&self.address) && self.date_range.is_none() && blank(&self.keyword) && self.status.is_none()
    }

    pub fn matches(&self, report: &Report) -> bool {
        if let Some(address) = self.address.as_deref()
            && !address.trim().is_empty()
            && !report.location.contains(address)
        {
            return false;
        }

        if let Some((from, to)) = self.date_range {
            match report.date_time {
                Some(at) if at >= from && at <= to => {}
                _ => return false,
            }
        }

        if let Some(keyword) = self.keyword.as_deref()
            && !keyword.trim().is_empty()
            && !report.location.contains(keyword)
            && !report.value.contains(keyword)
        {
            return false;
        }

        if let Some(status) = self.status
            && report.status != status
        {
            return false;
        }

        true
    }

    /// Reports matching every set criterion, in input order.
    pub fn apply(&self, reports: &[ReportPoint<Report>]) -> Vec<ReportPoint<Report>> {
        reports
            .iter()
            .filter(|r| self.matches(&r.payload))
            .cloned()
            .collect()
    }
}

fn blank(text: &Option<String>) -> bool {
    text.as_deref().is_none_or(|t| t.trim().is_empty())
}

/// Who is looking at the report list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewer {
    /// Sees every report and can toggle handled status
    Admin,
    /// Sees only reports still waiting to be handled
    Member,
}

impl Viewer {
    /// Parse a role name case-insensitively; anything but "admin" is a member.
    pub fn from_role(role: &str) -> Self {
        if role.eq_ignore_ascii_case("admin") {
            Viewer::Admin
        } else {
            Viewer::Member
        }
    }

    pub fn can_see(&self, report: &Report) -> bool {
        match self {
            Viewer::Admin => true,
            Viewer::Member => !report.status,
        }
    }

    pub fn visible<'a>(
        &self,
        reports: &'a [ReportPoint<Report>],
    ) -> impl Iterator<Item = &'a ReportPoint<Report>> + 'a {
        let viewer = *self;
        reports.iter().filter(move |r| viewer.can_see(&r.payload))
    }
}
