//! View debounce service
//!
//! Counts a post view at most once per client per window. Owned by
//! [`ServerState`](crate::core::ServerState) — deliberately not a
//! module-level static — with an explicit TTL and a periodic sweep.

use dashmap::DashMap;

use crate::utils::now_millis;

const DEFAULT_WINDOW_MS: i64 = 60 * 60 * 1000; // one hour

#[derive(Debug)]
pub struct ViewTracker {
    window_ms: i64,
    /// "{record_id}-{client}" -> last counted timestamp
    recent: DashMap<String, i64>,
}

impl ViewTracker {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW_MS)
    }

    pub fn with_window(window_ms: i64) -> Self {
        Self { window_ms, recent: DashMap::new() }
    }

    /// Whether this view should be counted; marks the pair when it is.
    pub fn should_count(&self, record_id: &str, client: &str) -> bool {
        self.mark_at(record_id, client, now_millis())
    }

    fn mark_at(&self, record_id: &str, client: &str, now: i64) -> bool {
        let key = format!("{record_id}-{client}");
        let mut entry = self.recent.entry(key).or_insert(i64::MIN);
        if now - *entry >= self.window_ms {
            *entry = now;
            true
        } else {
            false
        }
    }

    /// Drop entries older than the window. Run periodically.
    pub fn sweep(&self) {
        let cutoff = now_millis() - self.window_ms;
        self.recent.retain(|_, last| *last >= cutoff);
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

impl Default for ViewTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_once_per_window() {
        let tracker = ViewTracker::with_window(1000);
        assert!(tracker.mark_at("blog:a", "1.2.3.4", 10_000));
        assert!(!tracker.mark_at("blog:a", "1.2.3.4", 10_500));
        // window elapsed
        assert!(tracker.mark_at("blog:a", "1.2.3.4", 11_000));
    }

    #[test]
    fn clients_and_posts_are_independent() {
        let tracker = ViewTracker::with_window(1000);
        assert!(tracker.mark_at("blog:a", "1.2.3.4", 10_000));
        assert!(tracker.mark_at("blog:a", "5.6.7.8", 10_000));
        assert!(tracker.mark_at("blog:b", "1.2.3.4", 10_000));
    }

    #[test]
    fn sweep_evicts_stale_entries() {
        let tracker = ViewTracker::with_window(1);
        tracker.mark_at("blog:a", "1.2.3.4", 0);
        std::thread::sleep(std::time::Duration::from_millis(5));
        tracker.sweep();
        assert!(tracker.is_empty());
    }
}
