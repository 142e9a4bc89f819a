use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Label format used on the chart axis and in tooltips, e.g. `Jan 05`.
const DAY_LABEL_FORMAT: &str = "%b %d";

/// Parse a statistics date.
///
/// Accepts plain `YYYY-MM-DD` dates, RFC 3339 timestamps and naive
/// `YYYY-MM-DD HH:MM:SS` timestamps. Timestamps are reduced to their UTC date.
pub fn parse_stat_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|dt| dt.date())
}

/// Format a statistics date as a short day label.
///
/// Unparseable input is shown as-is rather than dropped, so the number of
/// labels always matches the number of statistics.
pub fn format_day_label(raw: &str) -> String {
    match parse_stat_date(raw) {
        Some(date) => date.format(DAY_LABEL_FORMAT).to_string(),
        None => {
            log::debug!("Unrecognised stat date {:?}, using it verbatim", raw);
            raw.to_string()
        }
    }
}
