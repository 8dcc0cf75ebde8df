//! 캐시 무효화와 상태 확인.

use market_core::types::{BarInterval, HistoryPeriod};
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use super::MarketDataService;
use crate::cache::CacheKey;

impl MarketDataService {
    /// 심볼의 스냅샷 캐시와, 지정된 경우 해당 과거 시세 캐시를 삭제합니다.
    ///
    /// 실제로 삭제된 키 수를 반환합니다. 캐시 오류는 삭제 0건으로 취급합니다.
    #[instrument(skip(self))]
    pub async fn invalidate(
        &self,
        symbol: &str,
        history: Option<(HistoryPeriod, BarInterval)>,
    ) -> usize {
        let mut keys = vec![CacheKey::snapshot(symbol)];
        if let Some((period, interval)) = history {
            keys.push(CacheKey::history(symbol, period, interval));
        }

        let mut removed = 0;
        for key in &keys {
            match timeout(self.policy.op_timeout, self.cache.delete(key)).await {
                Ok(Ok(true)) => removed += 1,
                Ok(Ok(false)) => {}
                Ok(Err(e)) => warn!(key = %key, error = %e, "캐시 삭제 실패"),
                Err(_) => warn!(key = %key, "캐시 삭제 타임아웃"),
            }
        }

        info!(symbol = %symbol, removed, "캐시 무효화");
        removed
    }

    /// 캐시 저장소 상태. 오류나 타임아웃이면 `false`.
    pub async fn cache_health(&self) -> bool {
        match timeout(self.policy.op_timeout, self.cache.ping()).await {
            Ok(Ok(up)) => up,
            Ok(Err(e)) => {
                warn!(cache = self.cache.name(), error = %e, "캐시 상태 확인 실패");
                false
            }
            Err(_) => {
                warn!(cache = self.cache.name(), "캐시 상태 확인 타임아웃");
                false
            }
        }
    }

    /// 사용 중인 캐시 저장소 이름.
    pub fn cache_backend(&self) -> &'static str {
        self.cache.name()
    }
}
