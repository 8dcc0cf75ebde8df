//! 캐시 기반 read-through 파이프라인.
//!
//! 모든 작업은 다음 흐름을 따릅니다:
//!
//! ```text
//! START → CACHE_LOOKUP ─┬─ HIT  → RETURN
//!                       └─ MISS → UPSTREAM_CALL ─┬─ SUCCESS → CACHE_WRITE(best-effort) → RETURN
//!                                                └─ FAILURE → DEGRADED_RESULT → RETURN
//! ```
//!
//! 캐시 오류(연결, 직렬화, 타임아웃)는 `CacheLookup::Unavailable`로 처리되어 미스와 같이
//! 업스트림으로 진행하되 이번 호출의 캐시 쓰기는 건너뜁니다. 업스트림 오류는 호출자에게
//! 전파하지 않고 `degraded`로 표시된 대체 결과를 반환합니다.
//!
//! 동일 키에 대한 동시 미스는 각자 업스트림을 호출하고 같은 항목을 덮어씁니다.

mod history;
mod maintenance;
mod news;
mod search;
mod snapshot;

use market_core::config::{AppConfig, PlaceholderSettings};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::cache::{CacheLookup, CachePolicy, CacheStore};
use crate::catalog::SymbolCatalog;
use crate::error::DataError;
use crate::provider::{ProviderError, QuoteProvider};
use crate::stats::{PipelineStats, StatsSnapshot};

/// read-through 결과.
enum Fetched<T> {
    /// 캐시 적중
    Cached(T),
    /// 업스트림에서 새로 가져옴
    Fresh(T),
    /// 업스트림 실패
    Failed(ProviderError),
}

/// 시세 데이터 파이프라인.
///
/// 캐시 저장소와 업스트림 제공자는 시작 시 한 번 생성되어 주입됩니다.
pub struct MarketDataService {
    cache: Arc<dyn CacheStore>,
    provider: Arc<dyn QuoteProvider>,
    policy: CachePolicy,
    upstream_timeout: Duration,
    placeholder: PlaceholderSettings,
    catalog: SymbolCatalog,
    news_symbol: String,
    news_count: usize,
    stats: PipelineStats,
}

impl MarketDataService {
    /// 설정으로부터 파이프라인을 생성합니다.
    pub fn new(
        cache: Arc<dyn CacheStore>,
        provider: Arc<dyn QuoteProvider>,
        config: &AppConfig,
    ) -> Self {
        Self {
            cache,
            provider,
            policy: CachePolicy::from(&config.cache),
            upstream_timeout: config.upstream.timeout(),
            placeholder: config.placeholder.clone(),
            catalog: SymbolCatalog::default(),
            news_symbol: config.market.news_symbol.clone(),
            news_count: config.upstream.news_count,
            stats: PipelineStats::new(),
        }
    }

    /// 검색 카탈로그를 교체합니다.
    pub fn with_catalog(mut self, catalog: SymbolCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// 캐시 정책을 교체합니다.
    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 업스트림 호출 타임아웃을 설정합니다.
    pub fn with_upstream_timeout(mut self, upstream_timeout: Duration) -> Self {
        self.upstream_timeout = upstream_timeout;
        self
    }

    /// 현재 캐시 정책.
    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// 파이프라인 통계.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// 캐시에서 값을 조회합니다. 오류는 모두 `Unavailable`로 바뀝니다.
    async fn cache_lookup<T: DeserializeOwned>(&self, key: &str) -> CacheLookup<T> {
        let lookup = match timeout(self.policy.op_timeout, self.cache.get(key)).await {
            Ok(Ok(Some(payload))) => match serde_json::from_str(&payload) {
                Ok(value) => CacheLookup::Hit(value),
                Err(e) => CacheLookup::Unavailable(DataError::from(e).to_string()),
            },
            Ok(Ok(None)) => CacheLookup::Miss,
            Ok(Err(e)) => CacheLookup::Unavailable(e.to_string()),
            Err(_) => CacheLookup::Unavailable(
                DataError::Timeout(format!("cache get {:?}", self.policy.op_timeout)).to_string(),
            ),
        };

        match &lookup {
            CacheLookup::Hit(_) => {
                debug!(key = %key, "Cache hit");
                self.stats.record_hit();
            }
            CacheLookup::Miss => {
                debug!(key = %key, "Cache miss");
                self.stats.record_miss();
            }
            CacheLookup::Unavailable(reason) => {
                warn!(key = %key, cache = self.cache.name(), error = %reason, "캐시 사용 불가");
                self.stats.record_cache_unavailable();
            }
        }

        lookup
    }

    /// 값을 캐시에 씁니다. 실패는 로그만 남깁니다.
    async fn cache_store<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = %key, error = %e, "캐시 직렬화 실패");
                return;
            }
        };

        match timeout(
            self.policy.op_timeout,
            self.cache.set_with_expiry(key, &payload, ttl_secs),
        )
        .await
        {
            Ok(Ok(())) => debug!(key = %key, ttl_secs, "Cache populated"),
            Ok(Err(e)) => warn!(key = %key, error = %e, "캐시 쓰기 실패"),
            Err(_) => warn!(key = %key, "캐시 쓰기 타임아웃"),
        }
    }

    /// 타임아웃을 걸어 업스트림을 호출합니다.
    async fn call_upstream<T, Fut>(&self, call: Fut) -> Result<T, ProviderError>
    where
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        self.call_upstream_within(self.upstream_timeout, call).await
    }

    /// 지정한 시간 안에 업스트림을 호출합니다.
    async fn call_upstream_within<T, Fut>(&self, budget: Duration, call: Fut) -> Result<T, ProviderError>
    where
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let result = match timeout(budget, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(format!("{:?}", budget))),
        };

        if let Err(e) = &result {
            warn!(provider = self.provider.name(), error = %e, "업스트림 호출 실패");
            self.stats.record_upstream_failure();
        }

        result
    }

    /// 캐시 조회 → (미스 시) 업스트림 호출 → 캐시 쓰기.
    async fn read_through<T, F, Fut>(&self, key: &str, ttl_secs: u64, fetch: F) -> Fetched<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        self.read_through_if(key, ttl_secs, fetch, |_| true).await
    }

    /// `read_through`와 같지만 `cacheable`이 참인 결과만 캐시에 씁니다.
    async fn read_through_if<T, F, Fut, P>(
        &self,
        key: &str,
        ttl_secs: u64,
        fetch: F,
        cacheable: P,
    ) -> Fetched<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
        P: FnOnce(&T) -> bool,
    {
        let lookup = self.cache_lookup::<T>(key).await;
        let write_back = lookup.allows_write_back();

        if let CacheLookup::Hit(value) = lookup {
            return Fetched::Cached(value);
        }

        match self.call_upstream(fetch()).await {
            Ok(value) => {
                if write_back && cacheable(&value) {
                    self.cache_store(key, &value, ttl_secs).await;
                } else if write_back {
                    debug!(key = %key, "캐시 대상 아님, 쓰기 건너뜀");
                }
                Fetched::Fresh(value)
            }
            Err(e) => Fetched::Failed(e),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubProvider;
    use super::*;
    use crate::cache::{CacheKey, MemoryCache};

    fn service(cache: Arc<MemoryCache>, provider: Arc<StubProvider>) -> MarketDataService {
        MarketDataService::new(cache, provider, &AppConfig::default())
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_unavailable() {
        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(StubProvider::default());
        let key = CacheKey::snapshot("TCS.NS");
        cache.set_with_expiry(&key, "{not json", 3600).await.unwrap();

        let svc = service(cache.clone(), provider.clone());
        let lookup = svc.cache_lookup::<serde_json::Value>(&key).await;

        assert!(matches!(lookup, CacheLookup::Unavailable(_)));
        assert_eq!(svc.stats().cache_unavailable, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upstream_timeout_is_failure() {
        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(StubProvider::default());
        let svc = service(cache, provider).with_upstream_timeout(Duration::from_millis(50));

        let result: Result<(), ProviderError> = svc
            .call_upstream(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(ProviderError::Timeout(_))));
        assert_eq!(svc.stats().upstream_failures, 1);
    }

    #[tokio::test]
    async fn test_builders() {
        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(StubProvider::default());
        let policy = CachePolicy {
            snapshot_ttl_secs: 10,
            ..CachePolicy::default()
        };

        let svc = service(cache, provider).with_policy(policy);
        assert_eq!(svc.policy().snapshot_ttl_secs, 10);
        assert_eq!(svc.policy().history_ttl_secs, 900);
    }
}
