mod daily_commits;
mod query;
mod state;
mod ui;

pub use daily_commits::{
    chart_points, ChartView, DailyCommitsChart, DAILY_WINDOW_DAYS, EMPTY_MESSAGE,
};
pub use query::{DailyStatsQuery, QueryState};
pub use state::App;
pub use ui::draw_ui;
