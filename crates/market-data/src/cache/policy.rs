//! 캐시 키와 TTL 정책.
//!
//! 키는 작업 종류 + 심볼 (+ 기간/간격) 조합이며, 키 하나가 값의 형태를 결정합니다.
//! 심볼은 제공자 형식 그대로 사용합니다 (`^NSEI`, `GC=F` 등).

use market_core::config::CacheSettings;
use market_core::types::{BarInterval, HistoryPeriod};
use std::time::Duration;

/// 캐시 키 생성기.
pub struct CacheKey;

impl CacheKey {
    /// 시세 스냅샷 키.
    pub fn snapshot(symbol: &str) -> String {
        format!("snapshot:{}", symbol)
    }

    /// 과거 시세 키. 기간/간격별로 독립 캐시됩니다.
    pub fn history(symbol: &str, period: HistoryPeriod, interval: BarInterval) -> String {
        format!("history:{}:{}:{}", symbol, period, interval)
    }

    /// 뉴스 키.
    pub fn news(symbol: &str) -> String {
        format!("news:{}", symbol)
    }
}

/// 작업 종류별 TTL과 캐시 작업 타임아웃.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// 스냅샷 TTL (초)
    pub snapshot_ttl_secs: u64,
    /// 과거 시세 TTL (초)
    pub history_ttl_secs: u64,
    /// 뉴스 TTL (초)
    pub news_ttl_secs: u64,
    /// 캐시 읽기/쓰기 타임아웃
    pub op_timeout: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::from(&CacheSettings::default())
    }
}

impl From<&CacheSettings> for CachePolicy {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            snapshot_ttl_secs: settings.snapshot_ttl_secs,
            history_ttl_secs: settings.history_ttl_secs,
            news_ttl_secs: settings.news_ttl_secs,
            op_timeout: settings.op_timeout(),
        }
    }
}
