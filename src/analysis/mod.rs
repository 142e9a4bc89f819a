mod cache;
pub mod git;
pub mod provider;


pub use cache::StatsCache;
pub use git::collect_commit_dates;
pub use provider::{DailyStatsProvider, FixtureProvider, GitStatsProvider, SnapshotProvider};
