//! # Daily Commit Dashboard
//!
//! `commitdash` renders a dashboard card charting daily commit counts over a
//! trailing 30-day window. Statistics come from an injected provider (local git
//! repositories or a JSON snapshot), are fetched in the background through a
//! cached query, and are drawn with plotters inside an egui card.
//!
//! ## Features
//!
//! - Daily commit aggregation across several local repositories
//! - Optional author filtering
//! - Background fetching with a time-limited cache
//! - Loading, empty and populated card states
//! - Themed line chart with hover tooltips
//! - Headless PNG export
//!
//! ## Example
//!
//! ```no_run
//! use commitdash::analysis::{FixtureProvider, StatsCache};
//! use commitdash::app::{App, DailyStatsQuery};
//! use commitdash::types::DailyStat;
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let provider = Arc::new(FixtureProvider::new(vec![DailyStat::new("2024-06-01", 3)]));
//! let cache = Arc::new(Mutex::new(StatsCache::new(Duration::from_secs(300))));
//! let query = DailyStatsQuery::new(provider, cache, rt.handle().clone());
//! let app = App::new(query, Vec::new(), Default::default());
//!
//! eframe::run_native(
//!     "Commit Dashboard",
//!     eframe::NativeOptions::default(),
//!     Box::new(|_cc| Ok(Box::new(app) as Box<dyn eframe::App>)),
//! ).unwrap();
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::{App as DashboardApp, ChartView, DailyCommitsChart, DailyStatsQuery, QueryState};
pub use error::{DashboardError, Result};
pub use types::{ChartPoint, DailyStat};
