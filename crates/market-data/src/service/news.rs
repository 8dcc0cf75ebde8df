//! 시장 뉴스.

use market_core::domain::NewsArticle;
use tracing::{instrument, warn};

use super::{Fetched, MarketDataService};
use crate::cache::CacheKey;

impl MarketDataService {
    /// 시장 뉴스. 심볼을 생략하면 설정된 대표 지수를 사용합니다.
    ///
    /// 업스트림 실패 시 빈 목록을 반환합니다.
    #[instrument(skip(self))]
    pub async fn get_market_news(&self, symbol: Option<&str>) -> Vec<NewsArticle> {
        let symbol = symbol.unwrap_or(&self.news_symbol);
        let key = CacheKey::news(symbol);

        let fetched = self
            .read_through(&key, self.policy.news_ttl_secs, move || {
                self.provider.fetch_news(symbol, self.news_count)
            })
            .await;

        match fetched {
            Fetched::Cached(news) | Fetched::Fresh(news) => news,
            Fetched::Failed(e) => {
                warn!(symbol = %symbol, error = %e, "뉴스 조회 실패, 빈 목록 반환");
                self.stats.record_degraded();
                Vec::new()
            }
        }
    }
}
