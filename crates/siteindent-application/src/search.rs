//! Debounced material search.

use siteindent_core::ApiError;
use siteindent_core::config::MIN_SEARCH_DEBOUNCE_MS;
use siteindent_core::material::{Material, MaterialCatalog};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// What became of one keystroke's query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<Material>),
    /// Below the minimum length; nothing was sent.
    TooShort,
    /// A newer query arrived; this one was dropped or its response discarded.
    Superseded,
}

/// Search-as-you-type over the material catalog.
///
/// Each call takes a fresh id from a monotonically increasing counter and
/// waits out the quiet period. If a newer call arrived meanwhile, nothing
/// is sent; if one arrives while the request is in flight, the response is
/// discarded. Only the latest query's results are ever returned.
pub struct DebouncedSearch {
    catalog: Arc<dyn MaterialCatalog>,
    quiet_period: Duration,
    min_chars: usize,
    latest: AtomicU64,
}

impl DebouncedSearch {
    /// The quiet period is raised to the minimum if shorter.
    pub fn new(catalog: Arc<dyn MaterialCatalog>, quiet_period: Duration, min_chars: usize) -> Self {
        Self {
            catalog,
            quiet_period: quiet_period.max(Duration::from_millis(MIN_SEARCH_DEBOUNCE_MS)),
            min_chars: min_chars.max(1),
            latest: AtomicU64::new(0),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub async fn search(&self, query: &str) -> Result<SearchOutcome, ApiError> {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim();
        if query.chars().count() < self.min_chars {
            return Ok(SearchOutcome::TooShort);
        }

        tokio::time::sleep(self.quiet_period).await;
        if !self.is_latest(id) {
            return Ok(SearchOutcome::Superseded);
        }

        tracing::debug!("[DebouncedSearch] #{} searching '{}'", id, query);
        let result = self.catalog.search_materials(query).await;
        if !self.is_latest(id) {
            tracing::debug!("[DebouncedSearch] #{} response discarded", id);
            return Ok(SearchOutcome::Superseded);
        }

        result.map(SearchOutcome::Results)
    }

    fn is_latest(&self, id: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingCatalog {
        queries: Mutex<Vec<String>>,
        latency: Duration,
    }

    impl RecordingCatalog {
        fn new(latency: Duration) -> Arc<Self> {
            Arc::new(Self {
                queries: Mutex::new(Vec::new()),
                latency,
            })
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MaterialCatalog for RecordingCatalog {
        async fn list_materials(&self) -> Result<Vec<Material>, ApiError> {
            Ok(Vec::new())
        }

        async fn search_materials(&self, query: &str) -> Result<Vec<Material>, ApiError> {
            self.queries.lock().unwrap().push(query.to_string());
            tokio::time::sleep(self.latency).await;
            Ok(vec![Material {
                id: format!("m-{}", query),
                name: query.to_string(),
                category: "General".to_string(),
                unit: "bags".to_string(),
                specifications: None,
            }])
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_sends_only_last_query() {
        let catalog = RecordingCatalog::new(ms(10));
        let search = DebouncedSearch::new(catalog.clone(), ms(300), 2);

        let (c, ce, cem) = tokio::join!(
            search.search("c"),
            async {
                tokio::time::sleep(ms(100)).await;
                search.search("ce").await
            },
            async {
                tokio::time::sleep(ms(200)).await;
                search.search("cem").await
            },
        );

        assert_eq!(c.unwrap(), SearchOutcome::TooShort);
        assert_eq!(ce.unwrap(), SearchOutcome::Superseded);
        match cem.unwrap() {
            SearchOutcome::Results(materials) => assert_eq!(materials[0].name, "cem"),
            other => panic!("expected results, got {:?}", other),
        }
        assert_eq!(catalog.queries(), vec!["cem".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let catalog = RecordingCatalog::new(ms(1_000));
        let search = DebouncedSearch::new(catalog.clone(), ms(300), 2);

        let (first, second) = tokio::join!(search.search("sand"), async {
            // Arrives while "sand" is in flight
            tokio::time::sleep(ms(500)).await;
            search.search("sandstone").await
        });

        assert_eq!(first.unwrap(), SearchOutcome::Superseded);
        assert!(matches!(second.unwrap(), SearchOutcome::Results(_)));
        assert_eq!(catalog.queries(), vec!["sand", "sandstone"]);
    }

    #[test]
    fn test_quiet_period_is_clamped() {
        let search = DebouncedSearch::new(RecordingCatalog::new(ms(0)), ms(50), 0);
        assert_eq!(search.quiet_period(), ms(300));
    }
}
