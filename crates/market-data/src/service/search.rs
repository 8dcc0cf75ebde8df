//! 종목 검색과 시세 보강.

use market_core::domain::{Enrichment, SearchCandidate};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::MarketDataService;
use crate::provider::FastQuote;

/// 배치 조회에 호출 타임아웃 외에 더 주는 시간.
const BATCH_GRACE: Duration = Duration::from_secs(2);

impl MarketDataService {
    /// 카탈로그 검색 후 배치 시세로 보강합니다.
    ///
    /// - 일치 항목이 없으면 업스트림 호출 없이 빈 목록
    /// - 심볼별 실패는 해당 심볼만 0 값 보강으로 대체
    /// - 배치 전체 실패 시 보강 없는 후보(심볼/이름만) 반환
    ///
    /// 검색 결과는 캐시하지 않습니다.
    #[instrument(skip(self))]
    pub async fn search_symbols(&self, query: &str) -> Vec<SearchCandidate> {
        let matches = self.catalog.search(query);
        if matches.is_empty() {
            debug!(query = %query, "검색 결과 없음");
            return Vec::new();
        }

        let symbols: Vec<String> = matches.iter().map(|e| e.symbol.clone()).collect();

        // 제공자는 호출 타임아웃 안에 부분 결과를 돌려주므로 바깥 마감은 여유를 둡니다.
        let budget = self.upstream_timeout + BATCH_GRACE;
        let batch = match self
            .call_upstream_within(budget, self.provider.fetch_batch(&symbols))
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                warn!(query = %query, error = %e, "배치 시세 조회 실패, 보강 없이 반환");
                self.stats.record_degraded();
                return matches
                    .into_iter()
                    .map(|e| SearchCandidate::new(e.symbol.as_str(), e.name.as_str()))
                    .collect();
            }
        };

        let mut any_zeroed = false;
        let candidates: Vec<SearchCandidate> = matches
            .into_iter()
            .map(|entry| {
                let symbol = entry.symbol.as_str();
                let candidate = SearchCandidate::new(symbol, entry.name.as_str());

                let enrichment = match batch.get(symbol) {
                    Some(Ok(FastQuote {
                        last_price: Some(price),
                        previous_close,
                    })) if price.is_finite() => {
                        Enrichment::from_prices(symbol, *price, *previous_close)
                    }
                    Some(Err(e)) => {
                        warn!(symbol = %symbol, error = %e, "심볼 시세 조회 실패");
                        any_zeroed = true;
                        Enrichment::zeroed(symbol)
                    }
                    _ => {
                        warn!(symbol = %symbol, "심볼 시세 누락");
                        any_zeroed = true;
                        Enrichment::zeroed(symbol)
                    }
                };

                candidate.with_quote(enrichment)
            })
            .collect();

        if any_zeroed {
            self.stats.record_degraded();
        }

        candidates
    }
}
