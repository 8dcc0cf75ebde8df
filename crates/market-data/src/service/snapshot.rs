//! 시세 스냅샷과 원자재 개요.

use futures::future::join_all;
use market_core::domain::{CommodityQuote, QuoteSnapshot};
use tracing::{instrument, warn};

use super::{Fetched, MarketDataService};
use crate::cache::CacheKey;
use crate::catalog::COMMODITIES;
use crate::provider::ProviderError;

impl MarketDataService {
    /// 단일 심볼 시세 스냅샷.
    ///
    /// 캐시 적중 시 업스트림을 호출하지 않습니다. 업스트림 실패 시
    /// `degraded`로 표시된 대체 스냅샷을 반환하며 캐시에는 쓰지 않습니다.
    #[instrument(skip(self))]
    pub async fn get_snapshot(&self, symbol: &str) -> QuoteSnapshot {
        let key = CacheKey::snapshot(symbol);

        let fetched = self
            .read_through(&key, self.policy.snapshot_ttl_secs, move || async move {
                let fields = self.provider.fetch_info(symbol).await?;
                Ok::<_, ProviderError>(QuoteSnapshot::from_provider_fields(symbol, fields))
            })
            .await;

        match fetched {
            Fetched::Cached(snapshot) | Fetched::Fresh(snapshot) => snapshot,
            Fetched::Failed(e) => {
                warn!(symbol = %symbol, error = %e, "스냅샷 조회 실패, 대체 데이터 반환");
                self.stats.record_degraded();
                QuoteSnapshot::placeholder(
                    symbol,
                    self.placeholder.price,
                    self.placeholder.change_percent,
                )
            }
        }
    }

    /// 원자재(금, 은, 원유) 시세 요약.
    ///
    /// 각 심볼의 스냅샷을 동시에 조회합니다. 결과 순서는 고정 목록 순서입니다.
    #[instrument(skip(self))]
    pub async fn get_commodities(&self) -> Vec<CommodityQuote> {
        let snapshots = join_all(
            COMMODITIES
                .iter()
                .map(|(symbol, _)| self.get_snapshot(symbol)),
        )
        .await;

        COMMODITIES
            .iter()
            .zip(snapshots.iter())
            .map(|((_, name), snapshot)| CommodityQuote::from_snapshot(name, snapshot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::StubProvider;
    use super::*;
    use crate::cache::{CacheStore, MemoryCache};
    use market_core::config::AppConfig;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_snapshot_populates_and_hits() {
        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(StubProvider::default());
        let svc = MarketDataService::new(cache.clone(), provider.clone(), &AppConfig::default());

        let first = svc.get_snapshot("TCS.NS").await;
        let second = svc.get_snapshot("TCS.NS").await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(first, second);
        assert_eq!(first.long_name.as_deref(), Some("TCS.NS Ltd"));
        assert_eq!(first.fields["currency"], "INR");
        assert!(cache.get("snapshot:TCS.NS").await.unwrap().is_some());

        let stats = svc.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[tokio::test]
    async fn test_snapshot_placeholder_on_failure() {
        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(StubProvider::failing());
        let svc = MarketDataService::new(cache.clone(), provider, &AppConfig::default());

        let snapshot = svc.get_snapshot("^NSEI").await;

        assert!(snapshot.degraded);
        assert_eq!(snapshot.symbol, "^NSEI");
        assert_eq!(snapshot.current_price, Some(1500.0));
        assert_eq!(snapshot.regular_market_change_percent, Some(1.5));
        assert!(cache.is_empty());
        assert_eq!(svc.stats().degraded, 1);
    }

    #[tokio::test]
    async fn test_commodities_in_fixed_order() {
        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(StubProvider::default());
        let svc = MarketDataService::new(cache, provider.clone(), &AppConfig::default());

        let commodities = svc.get_commodities().await;

        let names: Vec<&str> = commodities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Gold", "Silver", "Crude Oil"]);
        assert_eq!(commodities[0].symbol, "GC=F");
        // currentPrice 우선
        assert_eq!(commodities[0].price, Some(101.0));
        assert_eq!(commodities[0].change, Some(1.0));
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_commodities_degraded_on_failure() {
        let cache = Arc::new(MemoryCache::new());
        let provider = Arc::new(StubProvider::failing());
        let svc = MarketDataService::new(cache, provider, &AppConfig::default());

        let commodities = svc.get_commodities().await;

        assert_eq!(commodities.len(), 3);
        assert!(commodities.iter().all(|c| c.degraded && c.price == Some(1500.0)));
    }
}
