//! 과거 시세.

use market_core::domain::{sort_chronologically, HistoricalBar};
use market_core::types::{BarInterval, HistoryPeriod};
use tracing::{debug, instrument, warn};

use super::{Fetched, MarketDataService};
use crate::cache::CacheKey;
use crate::provider::{HistoryRow, ProviderError};

/// 제공자 봉 데이터를 시간 오름차순 캔들로 변환합니다.
///
/// 표현할 수 없는 타임스탬프의 행은 버립니다. 일봉 이상 간격은 날짜 단위로 맞춥니다.
fn rows_to_bars(rows: Vec<HistoryRow>, interval: BarInterval) -> Vec<HistoricalBar> {
    let mut bars: Vec<HistoricalBar> = rows
        .into_iter()
        .filter_map(|r| HistoricalBar::from_unix(r.timestamp, r.open, r.high, r.low, r.close, r.volume))
        .collect();
    sort_chronologically(&mut bars);

    if interval.is_intraday() {
        bars
    } else {
        bars.into_iter().map(HistoricalBar::at_day_start).collect()
    }
}

impl MarketDataService {
    /// 기간/간격별 과거 캔들.
    ///
    /// 업스트림 실패 시 빈 목록을 반환합니다. 빈 목록은 "데이터 없음"을 뜻하며
    /// 오류 신호가 아닙니다.
    #[instrument(skip(self))]
    pub async fn get_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
        interval: BarInterval,
    ) -> Vec<HistoricalBar> {
        let key = CacheKey::history(symbol, period, interval);

        // 빈 시계열은 캐시하지 않습니다.
        let fetched = self
            .read_through_if(
                &key,
                self.policy.history_ttl_secs,
                move || async move {
                    let rows = self.provider.fetch_history(symbol, period, interval).await?;
                    Ok::<_, ProviderError>(rows_to_bars(rows, interval))
                },
                |bars: &Vec<HistoricalBar>| !bars.is_empty(),
            )
            .await;

        match fetched {
            Fetched::Cached(bars) => bars,
            Fetched::Fresh(bars) => {
                if bars.is_empty() {
                    debug!(symbol = %symbol, period = %period, interval = %interval, "과거 시세 없음");
                }
                bars
            }
            Fetched::Failed(e) => {
                warn!(symbol = %symbol, error = %e, "과거 시세 조회 실패, 빈 목록 반환");
                self.stats.record_degraded();
                Vec::new()
            }
        }
    }
}
