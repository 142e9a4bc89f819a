use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::analysis::{DailyStatsProvider, StatsCache};
use crate::error::DashboardError;
use crate::types::DailyStat;

/// What a widget sees when it asks for statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    /// Latest successfully fetched statistics, newest first
    pub data: Option<Vec<DailyStat>>,
    /// True while a fetch is running and there is nothing to show yet
    pub is_loading: bool,
}

/// Background fetch of daily statistics with a shared, time-limited cache.
///
/// The first `poll` for a window either answers from the cache or starts a
/// fetch on the tokio runtime. Later polls refetch in the background once the
/// cached entry and the last attempt are both older than the cache TTL. At
/// most one fetch runs at a time. A failed fetch keeps whatever data was
/// already published.
pub struct DailyStatsQuery {
    provider: Arc<dyn DailyStatsProvider>,
    cache: Arc<Mutex<StatsCache>>,
    runtime: Handle,
    shared: Arc<Mutex<QueryState>>,
    window_days: Option<u32>,
    inflight: Option<JoinHandle<()>>,
    last_fetch: Option<Instant>,
    repaint: Option<egui::Context>,
}

impl DailyStatsQuery {
    pub fn new(
        provider: Arc<dyn DailyStatsProvider>,
        cache: Arc<Mutex<StatsCache>>,
        runtime: Handle,
    ) -> Self {
        Self {
            provider,
            cache,
            runtime,
            shared: Arc::new(Mutex::new(QueryState::default())),
            window_days: None,
            inflight: None,
            last_fetch: None,
            repaint: None,
        }
    }

    /// Ask the UI to redraw whenever a fetch completes
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    /// Current state for `window_days`, starting a fetch on first use
    pub fn poll(&mut self, window_days: u32) -> QueryState {
        if self.window_days != Some(window_days) {
            if let Some(previous) = self.inflight.take() {
                previous.abort();
            }
            self.window_days = Some(window_days);
            *lock(&self.shared) = QueryState::default();

            let cached = lock(&self.cache).get_fresh(window_days);
            match cached {
                Some(stats) => {
                    log::debug!("Serving {} cached days for a {}-day window", stats.len(), window_days);
                    lock(&self.shared).data = Some(stats);
                }
                None => self.start_fetch(window_days),
            }
        } else if !self.is_fetching() && self.is_stale(window_days) {
            log::debug!("Cached {}-day window went stale, refetching", window_days);
            self.start_fetch(window_days);
        }
        lock(&self.shared).clone()
    }

    /// Drop the cached window and fetch it again, keeping current data on screen
    pub fn refetch(&mut self) {
        let Some(window_days) = self.window_days else {
            return;
        };
        lock(&self.cache).invalidate(window_days);
        self.start_fetch(window_days);
    }

    pub fn is_fetching(&self) -> bool {
        self.inflight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Wait for the in-flight fetch, if any
    pub async fn settle(&mut self) {
        if let Some(handle) = self.inflight.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    log::error!("Daily stats fetch task failed: {}", e);
                }
            }
        }
    }

    fn is_stale(&self, window_days: u32) -> bool {
        let cache = lock(&self.cache);
        if cache.is_fresh(window_days) {
            return false;
        }
        // Failed fetches never reach the cache; pace retries by the TTL too
        self.last_fetch
            .map_or(true, |started| started.elapsed() >= cache.ttl())
    }

    fn start_fetch(&mut self, window_days: u32) {
        if self.is_fetching() {
            log::debug!("Fetch already in flight, not starting another");
            return;
        }
        self.last_fetch = Some(Instant::now());

        {
            let mut state = lock(&self.shared);
            state.is_loading = state.data.is_none();
        }

        let provider = Arc::clone(&self.provider);
        let cache = Arc::clone(&self.cache);
        let shared = Arc::clone(&self.shared);
        let repaint = self.repaint.clone();
        log::info!("Fetching {} days of stats from {}", window_days, provider.describe());

        self.inflight = Some(self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || provider.fetch_daily_stats(window_days))
                .await
                .map_err(DashboardError::from)
                .and_then(|stats| stats);

            match result {
                Ok(stats) => {
                    log::debug!("Fetched {} daily stats", stats.len());
                    lock(&cache).store(window_days, stats.clone());
                    let mut state = lock(&shared);
                    state.data = Some(stats);
                    state.is_loading = false;
                }
                Err(e) => {
                    log::warn!("Failed to fetch daily stats: {}", e);
                    lock(&shared).is_loading = false;
                }
            }

            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        }));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
