use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::types::DailyStat;

/// First day covered by a window of `window_days` ending on `today`.
pub fn window_start(today: NaiveDate, window_days: u32) -> NaiveDate {
    today - Duration::days(i64::from(window_days.max(1)) - 1)
}

/// Bucket commit dates into per-day totals.
///
/// Only days inside `[today - (window_days - 1), today]` that saw at least one
/// commit produce an entry. The result is ordered newest first.
pub fn daily_totals<I>(commit_dates: I, today: NaiveDate, window_days: u32) -> Vec<DailyStat>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let start = window_start(today, window_days);
    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();

    for date in commit_dates {
        if date < start || date > today {
            continue;
        }
        *per_day.entry(date).or_insert(0) += 1;
    }

    per_day
        .into_iter()
        .rev()
        .map(|(date, count)| DailyStat::new(date.format("%Y-%m-%d").to_string(), count))
        .collect()
}

/// Sum several newest-first series into one, keyed by `stat_date`.
pub fn merge_daily_totals(series: Vec<Vec<DailyStat>>) -> Vec<DailyStat> {
    let mut per_day: BTreeMap<String, u32> = BTreeMap::new();
    for stat in series.into_iter().flatten() {
        *per_day.entry(stat.stat_date).or_insert(0) += stat.total_commits;
    }

    per_day
        .into_iter()
        .rev()
        .map(|(date, count)| DailyStat::new(date, count))
        .collect()
}
