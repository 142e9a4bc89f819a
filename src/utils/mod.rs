pub mod aggregation;
pub mod dates;

pub use aggregation::daily_totals;
pub use dates::{format_day_label, parse_stat_date};
