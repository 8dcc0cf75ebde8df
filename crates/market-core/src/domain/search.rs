//! 종목 검색 결과.

use serde::{Deserialize, Serialize};

use crate::types::{exchange_for, quote_type_for};

/// 변동률 계산 (%).
///
/// 전일 종가가 없거나 0이면 0을 반환합니다.
pub fn change_percent(price: f64, previous_close: Option<f64>) -> f64 {
    match previous_close {
        Some(prev) if prev != 0.0 => (price - prev) / prev * 100.0,
        _ => 0.0,
    }
}

/// 검색 결과의 시세 보강 데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    /// 거래소 코드 (예: "NSE")
    pub exchange: String,
    /// 상품 유형 (예: "EQUITY", "INDEX")
    pub quote_type: String,
    /// 현재가
    pub regular_market_price: f64,
    /// 전일 대비 변동액
    pub regular_market_change: f64,
    /// 전일 대비 변동률 (%)
    pub regular_market_change_percent: f64,
    /// 이 심볼의 시세 조회가 실패해 0으로 채워졌는지 여부
    #[serde(default)]
    pub degraded: bool,
}

impl Enrichment {
    /// 현재가와 전일 종가로 보강 데이터를 만듭니다.
    pub fn from_prices(symbol: &str, price: f64, previous_close: Option<f64>) -> Self {
        let change = previous_close.map(|prev| price - prev).unwrap_or(0.0);

        Self {
            exchange: exchange_for(symbol).to_string(),
            quote_type: quote_type_for(symbol).to_string(),
            regular_market_price: price,
            regular_market_change: change,
            regular_market_change_percent: change_percent(price, previous_close),
            degraded: false,
        }
    }

    /// 조회 실패한 심볼용 0 값 보강 데이터.
    pub fn zeroed(symbol: &str) -> Self {
        Self {
            exchange: exchange_for(symbol).to_string(),
            quote_type: quote_type_for(symbol).to_string(),
            regular_market_price: 0.0,
            regular_market_change: 0.0,
            regular_market_change_percent: 0.0,
            degraded: true,
        }
    }
}

/// 종목 검색 후보.
///
/// 배치 시세 조회 전체가 실패하면 `quote`가 없는 상태(심볼/이름만)로 반환됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// 심볼
    pub symbol: String,
    /// 표시 이름
    pub name: String,
    /// 시세 보강 데이터
    #[serde(flatten)]
    pub quote: Option<Enrichment>,
}

impl SearchCandidate {
    /// 보강 없는 후보.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            quote: None,
        }
    }

    /// 보강 데이터를 붙입니다.
    pub fn with_quote(mut self, quote: Enrichment) -> Self {
        self.quote = Some(quote);
        self
    }
}
