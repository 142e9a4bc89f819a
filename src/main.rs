//! Daily Commit Dashboard
//!
//! A GUI application charting daily commit activity over the last 30 days.

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use eframe::egui;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

use commitdash::analysis::StatsCache;
use commitdash::app::{App, ChartView, DailyStatsQuery, DAILY_WINDOW_DAYS, EMPTY_MESSAGE};
use commitdash::config::{Cli, DashboardConfig};
use commitdash::plotting::{export_png, ChartStyle, ChartTheme};

const DEFAULT_LOG_FILTER: &str = if cfg!(feature = "dev") { "debug" } else { "info" };

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let cli = Cli::parse();
    cli.validate()?;
    let config = DashboardConfig::resolve(&cli).context("Failed to load configuration")?;

    let rt = Runtime::new().context("Failed to start the async runtime")?;
    let cache = Arc::new(Mutex::new(StatsCache::new(config.stale_time())));
    let query = DailyStatsQuery::new(config.build_provider(), cache, rt.handle().clone());

    if let Some(path) = &cli.export {
        return rt.block_on(export_chart(query, &config, path, cli.width));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Commit Dashboard"),
        ..Default::default()
    };

    let sources = config.sources();
    let theme = config.theme.clone();
    eframe::run_native(
        "Commit Dashboard",
        options,
        Box::new(move |cc| {
            let mut app = App::new(query, sources, theme);
            app.query.set_repaint_context(cc.egui_ctx.clone());
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow!("Error running application: {}", e))
}

async fn export_chart(
    mut query: DailyStatsQuery,
    config: &DashboardConfig,
    path: &Path,
    width: u32,
) -> anyhow::Result<()> {
    query.poll(DAILY_WINDOW_DAYS);
    query.settle().await;

    match ChartView::from_state(&query.poll(DAILY_WINDOW_DAYS)) {
        ChartView::Populated(points) => {
            let theme = ChartTheme::default().apply_overrides(&config.theme);
            export_png(&points, path, width, &theme, &ChartStyle::default())?;
            Ok(())
        }
        _ => bail!(EMPTY_MESSAGE),
    }
}
