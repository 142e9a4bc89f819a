//! # Common Types
//!
//! Records exchanged between the statistics providers and the chart widget.

use serde::{Deserialize, Serialize};

/// Aggregated commit count for one calendar day.
///
/// Providers return these newest-first. Fields other than the two below are
/// ignored when reading snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyStat {
    /// The day, usually `YYYY-MM-DD`; full RFC 3339 timestamps are accepted too
    pub stat_date: String,
    /// Number of commits recorded on that day
    pub total_commits: u32,
}

impl DailyStat {
    pub fn new(stat_date: impl Into<String>, total_commits: u32) -> Self {
        Self {
            stat_date: stat_date.into(),
            total_commits,
        }
    }
}

/// One plotted point: a short day label and its commit count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub commits: u32,
}
