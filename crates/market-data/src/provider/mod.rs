//! 업스트림 시세 제공자.
//!
//! 파이프라인은 [`QuoteProvider`] trait 객체를 통해 외부 데이터 소스를 호출합니다.
//! 제공자는 상태를 갖지 않으며, 심볼은 제공자 형식 그대로 전달됩니다.

mod yahoo;

pub use yahoo::YahooProvider;

use async_trait::async_trait;
use market_core::domain::NewsArticle;
use market_core::types::{BarInterval, HistoryPeriod};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

/// 업스트림 호출 오류.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("네트워크 오류: {0}")]
    Network(String),

    #[error("요청 한도 초과")]
    RateLimited,

    #[error("심볼을 찾을 수 없음: {0}")]
    NotFound(String),

    #[error("API 오류: {0}")]
    Api(String),

    #[error("응답 파싱 실패: {0}")]
    Parse(String),

    #[error("업스트림 타임아웃: {0}")]
    Timeout(String),
}

impl ProviderError {
    /// 재시도로 해결될 수 있는 오류인지 여부.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::Network(_) | ProviderError::RateLimited | ProviderError::Timeout(_)
        )
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// 제공자가 반환하는 원시 봉 데이터.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRow {
    /// Unix 타임스탬프 (초)
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// 배치 조회용 간이 시세.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FastQuote {
    /// 최근 체결가
    pub last_price: Option<f64>,
    /// 전일 종가
    pub previous_close: Option<f64>,
}

/// 배치 조회 결과. 심볼별로 독립된 성공/실패를 가집니다.
pub type BatchQuotes = HashMap<String, Result<FastQuote, ProviderError>>;

/// 업스트림 시세 제공자 trait.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// 제공자 이름.
    fn name(&self) -> &str;

    /// 단일 심볼 정보 (제공자 필드 맵).
    async fn fetch_info(&self, symbol: &str) -> Result<Map<String, Value>, ProviderError>;

    /// 기간/간격별 과거 봉 데이터.
    async fn fetch_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
        interval: BarInterval,
    ) -> Result<Vec<HistoryRow>, ProviderError>;

    /// 여러 심볼의 간이 시세를 한 번에 조회합니다.
    ///
    /// 일부 심볼 실패는 결과 맵의 해당 항목으로 표현하며,
    /// 배치 전체가 실패한 경우에만 `Err`를 반환합니다.
    async fn fetch_batch(&self, symbols: &[String]) -> Result<BatchQuotes, ProviderError>;

    /// 심볼 관련 뉴스.
    async fn fetch_news(&self, symbol: &str, count: usize)
        -> Result<Vec<NewsArticle>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(ProviderError::Network("reset".into()).is_retryable());
        assert!(ProviderError::RateLimited.is_retryable());
        assert!(ProviderError::Timeout("10s".into()).is_retryable());
        assert!(!ProviderError::NotFound("XYZ".into()).is_retryable());
        assert!(!ProviderError::Parse("bad json".into()).is_retryable());
    }
}
