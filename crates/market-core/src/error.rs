//! 시세 데이터 레이어의 에러 타입.
//!
//! 파이프라인 자체는 실패를 밖으로 전파하지 않습니다. 이 모듈의 에러는
//! 설정 로드나 잘못된 입력처럼 호출자(consumer) 쪽에서 처리해야 하는 경우에만 사용됩니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum MarketError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력 (심볼, 기간, 간격 등)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type MarketResult<T> = Result<T, MarketError>;

impl MarketError {
    /// 호출자 입력 문제로 발생한 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(self, MarketError::InvalidInput(_))
    }
}

impl From<config::ConfigError> for MarketError {
    fn from(err: config::ConfigError) -> Self {
        MarketError::Config(err.to_string())
    }
}
