//! 과거 시세 캔들.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// 과거 시세 캔들 (OHLCV).
///
/// `date`는 ISO-8601로 직렬화됩니다. 일봉 이상이면 자정 기준 시각,
/// 분봉이면 해당 캔들의 시작 시각입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBar {
    /// 캔들 시작 시각
    pub date: DateTime<Utc>,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량
    pub volume: u64,
}

impl HistoricalBar {
    /// Unix 타임스탬프(초)로부터 캔들을 만듭니다.
    ///
    /// 표현할 수 없는 타임스탬프면 `None`.
    pub fn from_unix(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Option<Self> {
        let date = Utc.timestamp_opt(timestamp, 0).single()?;
        Some(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// 캔들 시각을 UTC 자정으로 맞춥니다. 일봉 이상 간격에 사용합니다.
    pub fn at_day_start(mut self) -> Self {
        self.date = Utc.from_utc_datetime(&self.date.date_naive().and_time(NaiveTime::MIN));
        self
    }
}

/// 캔들을 시간 오름차순으로 정렬합니다.
pub fn sort_chronologically(bars: &mut [HistoricalBar]) {
    bars.sort_by_key(|b| b.date);
}
