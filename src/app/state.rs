use std::collections::HashMap;

use super::daily_commits::DailyCommitsChart;
use super::query::DailyStatsQuery;

/// Main application state
pub struct App {
    pub query: DailyStatsQuery,
    pub chart: DailyCommitsChart,
    /// Human-readable list of where statistics come from
    pub sources: Vec<String>,
}

impl App {
    pub fn new(
        query: DailyStatsQuery,
        sources: Vec<String>,
        theme_overrides: HashMap<String, String>,
    ) -> Self {
        Self {
            query,
            chart: DailyCommitsChart::new(&theme_overrides),
            sources,
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::draw_ui(self, ctx);
    }
}
