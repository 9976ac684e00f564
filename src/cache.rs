use chrono::{DateTime, Duration, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use crate::analyzer::AnalysisResult;

#[derive(Debug, Clone)]
struct CachedAnalysis {
    result: Arc<AnalysisResult>,
    stored_at: DateTime<Utc>,
}

impl CachedAnalysis {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.stored_at < ttl
    }
}

/// URL-keyed LRU cache of analysis results with a TTL.
///
/// Stale entries are dropped on lookup. A poisoned lock behaves like an
/// empty cache.
#[derive(Debug)]
pub struct ResultCache {
    /// `None` when the cache was built with zero capacity.
    entries: Option<Mutex<LruCache<String, CachedAnalysis>>>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(ttl: std::time::Duration, max_entries: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(max_entries).map(|cap| Mutex::new(LruCache::new(cap))),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(36_500)),
        }
    }

    pub fn get(&self, url: &str) -> Option<Arc<AnalysisResult>> {
        self.get_at(url, Utc::now())
    }

    fn get_at(&self, url: &str, now: DateTime<Utc>) -> Option<Arc<AnalysisResult>> {
        let mut entries = self.entries.as_ref()?.lock().ok()?;
        match entries.get(url) {
            Some(entry) if entry.is_fresh(now, self.ttl) => Some(Arc::clone(&entry.result)),
            Some(_) => {
                tracing::debug!("Cached analysis for {} expired", url);
                entries.pop(url);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, url: &str, result: AnalysisResult) -> Arc<AnalysisResult> {
        self.put_at(url, result, Utc::now())
    }

    fn put_at(&self, url: &str, result: AnalysisResult, now: DateTime<Utc>) -> Arc<AnalysisResult> {
        let result = Arc::new(result);
        let Some(entries) = self.entries.as_ref() else {
            return result;
        };
        let Ok(mut entries) = entries.lock() else {
            tracing::warn!("Result cache lock poisoned; not caching {}", url);
            return result;
        };

        let entry = CachedAnalysis {
            result: Arc::clone(&result),
            stored_at: now,
        };
        if let Some((evicted, _)) = entries.push(url.to_string(), entry) {
            if evicted != url {
                tracing::debug!("Evicting cached analysis for {}", evicted);
            }
        }
        result
    }

    pub fn len(&self) -> usize {
        self.entries
            .as_ref()
            .and_then(|entries| entries.lock().ok().map(|e| e.len()))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::PageAnalyzer;
    use crate::scoring::FixedMetricSource;
    use crate::topic::TopicModelStore;

    fn sample() -> AnalysisResult {
        PageAnalyzer::new(Arc::new(TopicModelStore::empty()))
            .with_metric_source(Arc::new(FixedMetricSource::default()))
            .analyze_html("<h1>Hello</h1>")
    }

    fn cache(max_entries: usize) -> ResultCache {
        ResultCache::new(std::time::Duration::from_secs(60), max_entries)
    }

    #[test]
    fn test_hit_within_ttl_miss_after() {
        let cache = cache(4);
        let t0 = Utc::now();
        cache.put_at("https://a.test", sample(), t0);

        assert!(cache.get_at("https://a.test", t0 + Duration::seconds(59)).is_some());
        assert!(cache.get_at("https://a.test", t0 + Duration::seconds(60)).is_none());
        assert!(cache.get_at("https://b.test", t0).is_none());
    }

    #[test]
    fn test_stale_entry_removed_on_lookup() {
        let cache = cache(4);
        let t0 = Utc::now();
        cache.put_at("https://a.test", sample(), t0);
        assert_eq!(cache.len(), 1);

        assert!(cache.get_at("https://a.test", t0 + Duration::seconds(90)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_least_recently_used_entry_evicted_when_full() {
        let cache = cache(2);
        let t0 = Utc::now();
        cache.put_at("https://a.test", sample(), t0);
        cache.put_at("https://b.test", sample(), t0 + Duration::seconds(1));
        cache.put_at("https://c.test", sample(), t0 + Duration::seconds(2));

        let now = t0 + Duration::seconds(3);
        assert_eq!(cache.len(), 2);
        assert!(cache.get_at("https://a.test", now).is_none());
        assert!(cache.get_at("https://b.test", now).is_some());
        assert!(cache.get_at("https://c.test", now).is_some());
    }

    #[test]
    fn test_lookup_refreshes_recency() {
        let cache = cache(2);
        let t0 = Utc::now();
        cache.put_at("https://a.test", sample(), t0);
        cache.put_at("https://b.test", sample(), t0);
        assert!(cache.get_at("https://a.test", t0).is_some());
        cache.put_at("https://c.test", sample(), t0);

        assert!(cache.get_at("https://a.test", t0).is_some());
        assert!(cache.get_at("https://b.test", t0).is_none());
    }

    #[test]
    fn test_reinsert_replaces_entry_and_restarts_ttl() {
        let cache = cache(2);
        let t0 = Utc::now();
        cache.put_at("https://a.test", sample(), t0);
        let second = cache.put_at("https://a.test", sample(), t0 + Duration::seconds(50));

        assert_eq!(cache.len(), 1);
        let hit = cache.get_at("https://a.test", t0 + Duration::seconds(100));
        assert!(hit.is_some_and(|hit| Arc::ptr_eq(&hit, &second)));
    }

    #[test]
    fn test_zero_capacity_never_stores() {
        let cache = cache(0);
        cache.put("https://a.test", sample());
        assert!(cache.is_empty());
        assert!(cache.get("https://a.test").is_none());
    }
}
