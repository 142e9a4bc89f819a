use chrono::{NaiveDate, Utc};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::git::collect_commit_dates;
use crate::error::{DashboardError, Result};
use crate::types::DailyStat;
use crate::utils::aggregation::{daily_totals, merge_daily_totals, window_start};

/// A source of daily commit statistics.
///
/// Implementations may block; callers run them off the UI thread.
pub trait DailyStatsProvider: Send + Sync {
    /// Fetch up to `window_days` daily statistics, newest first
    fn fetch_daily_stats(&self, window_days: u32) -> Result<Vec<DailyStat>>;

    /// Short human-readable description of where the statistics come from
    fn describe(&self) -> String;
}

/// Statistics computed from the HEAD history of local git repositories.
#[derive(Debug, Clone)]
pub struct GitStatsProvider {
    repositories: Vec<PathBuf>,
    author: Option<String>,
    today: Option<NaiveDate>,
}

impl GitStatsProvider {
    pub fn new(repositories: Vec<PathBuf>) -> Self {
        Self {
            repositories,
            author: None,
            today: None,
        }
    }

    /// Count only commits authored by `author`
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Pin the last day of the window instead of using the current UTC date
    pub fn anchored_at(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

impl DailyStatsProvider for GitStatsProvider {
    fn fetch_daily_stats(&self, window_days: u32) -> Result<Vec<DailyStat>> {
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        let since = window_start(today, window_days);

        let mut series = Vec::with_capacity(self.repositories.len());
        for path in &self.repositories {
            let dates = collect_commit_dates(path, self.author.as_deref(), since)?;
            series.push(daily_totals(dates, today, window_days));
        }

        let stats = merge_daily_totals(series);
        log::info!(
            "Collected {} active days from {} repositories",
            stats.len(),
            self.repositories.len()
        );
        Ok(stats)
    }

    fn describe(&self) -> String {
        match &self.author {
            Some(author) => format!("{} repositories ({})", self.repositories.len(), author),
            None => format!("{} repositories", self.repositories.len()),
        }
    }
}

/// Statistics read from a JSON array of `DailyStat` records.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    path: PathBuf,
}

impl SnapshotProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DailyStatsProvider for SnapshotProvider {
    fn fetch_daily_stats(&self, window_days: u32) -> Result<Vec<DailyStat>> {
        let raw = std::fs::read_to_string(&self.path)?;
        let mut stats: Vec<DailyStat> = serde_json::from_str(&raw)?;
        stats.truncate(window_days as usize);
        log::debug!("Loaded {} entries from {}", stats.len(), self.path.display());
        Ok(stats)
    }

    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }
}

/// Fixed statistics, or a fixed failure, for tests and demos.
#[derive(Debug)]
pub struct FixtureProvider {
    outcome: std::result::Result<Vec<DailyStat>, String>,
    calls: AtomicUsize,
}

impl FixtureProvider {
    pub fn new(stats: Vec<DailyStat>) -> Self {
        Self {
            outcome: Ok(stats),
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider whose every fetch fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DailyStatsProvider for FixtureProvider {
    fn fetch_daily_stats(&self, window_days: u32) -> Result<Vec<DailyStat>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(stats) => Ok(stats.iter().take(window_days as usize).cloned().collect()),
            Err(message) => Err(DashboardError::Io(std::io::Error::other(message.clone()))),
        }
    }

    fn describe(&self) -> String {
        "fixture".to_string()
    }
}
