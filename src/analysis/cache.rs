use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::types::DailyStat;

const CACHE_CAPACITY: usize = 8;

/// Time-limited cache of fetched statistics, keyed by window length in days.
///
/// Shared between the UI thread and fetch tasks as `Arc<Mutex<StatsCache>>`.
pub struct StatsCache {
    entries: LruCache<u32, (Vec<DailyStat>, Instant)>,
    ttl: Duration,
}

impl StatsCache {
    /// Create a cache whose entries stay fresh for `ttl`
    pub fn new(ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether the window holds an entry younger than the TTL
    pub fn is_fresh(&self, window_days: u32) -> bool {
        self.entries
            .peek(&window_days)
            .is_some_and(|(_, stored_at)| stored_at.elapsed() < self.ttl)
    }

    /// Store a result for a window, replacing any previous one
    pub fn store(&mut self, window_days: u32, stats: Vec<DailyStat>) {
        self.entries.put(window_days, (stats, Instant::now()));
    }

    /// Retrieve a result if it is younger than the TTL
    pub fn get_fresh(&mut self, window_days: u32) -> Option<Vec<DailyStat>> {
        let ttl = self.ttl;
        match self.entries.get(&window_days) {
            Some((stats, stored_at)) if stored_at.elapsed() < ttl => Some(stats.clone()),
            Some(_) => {
                self.entries.pop(&window_days);
                None
            }
            None => None,
        }
    }

    /// Drop the entry for one window
    pub fn invalidate(&mut self, window_days: u32) {
        self.entries.pop(&window_days);
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}
