//! 단일 심볼 시세 스냅샷.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 제공자 필드 중 스냅샷이 직접 해석하는 키.
const KNOWN_FIELDS: [&str; 6] = [
    "symbol",
    "longName",
    "currentPrice",
    "regularMarketPrice",
    "regularMarketChangePercent",
    "degraded",
];

/// 시세 스냅샷.
///
/// 요청마다 캐시 또는 업스트림에서 새로 만들어지며, 이전 조회 결과와 병합되지 않습니다.
/// 해석하지 않는 제공자 필드는 `fields`에 그대로 보존되어 직렬화 시 최상위로 펼쳐집니다.
///
/// 캐시에는 이 구조체 전체가 하나의 JSON 값으로 저장됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    /// 제공자 형식 심볼 (예: "RELIANCE.NS", "^NSEI", "GC=F")
    pub symbol: String,

    /// 표시 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,

    /// 현재가
    #[serde(default)]
    pub current_price: Option<f64>,

    /// 정규장 가격
    #[serde(default)]
    pub regular_market_price: Option<f64>,

    /// 전일 대비 변동률 (%)
    #[serde(default)]
    pub regular_market_change_percent: Option<f64>,

    /// 업스트림 실패로 만들어진 대체 데이터인지 여부
    #[serde(default)]
    pub degraded: bool,

    /// 그 밖의 제공자 필드 (통화, 거래소, 고가/저가 등)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl QuoteSnapshot {
    /// 제공자 필드 맵으로부터 스냅샷을 만듭니다.
    ///
    /// 맵에 `symbol`이 없으면 요청한 심볼을 사용합니다.
    /// `longName`이 없으면 `shortName`을 표시 이름으로 사용합니다.
    pub fn from_provider_fields(requested_symbol: &str, mut fields: Map<String, Value>) -> Self {
        let symbol = fields
            .get("symbol")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| requested_symbol.to_string());

        let long_name = fields
            .get("longName")
            .or_else(|| fields.get("shortName"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let current_price = fields.get("currentPrice").and_then(Value::as_f64);
        let regular_market_price = fields.get("regularMarketPrice").and_then(Value::as_f64);
        let regular_market_change_percent = fields
            .get("regularMarketChangePercent")
            .and_then(Value::as_f64);

        for key in KNOWN_FIELDS {
            fields.remove(key);
        }

        Self {
            symbol,
            long_name,
            current_price,
            regular_market_price,
            regular_market_change_percent,
            degraded: false,
            fields,
        }
    }

    /// 업스트림 실패 시 반환할 대체 스냅샷.
    ///
    /// 이름에 "(Mock)"을 붙이고 `degraded`를 설정하여 실제 데이터와 구분됩니다.
    pub fn placeholder(symbol: &str, price: f64, change_percent: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            long_name: Some(format!("{} (Mock)", symbol)),
            current_price: Some(price),
            regular_market_price: Some(price),
            regular_market_change_percent: Some(change_percent),
            degraded: true,
            fields: Map::new(),
        }
    }

    /// 표시 가격 (현재가 우선, 없으면 정규장 가격).
    pub fn price(&self) -> Option<f64> {
        self.current_price.or(self.regular_market_price)
    }
}

/// 원자재 시세 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityQuote {
    /// 심볼 (예: "GC=F")
    pub symbol: String,
    /// 이름 (예: "Gold")
    pub name: String,
    /// 가격
    pub price: Option<f64>,
    /// 변동률 (%)
    pub change: Option<f64>,
    /// 대체 데이터 여부
    #[serde(default)]
    pub degraded: bool,
}

impl CommodityQuote {
    /// 스냅샷으로부터 요약을 만듭니다.
    pub fn from_snapshot(name: &str, snapshot: &QuoteSnapshot) -> Self {
        Self {
            symbol: snapshot.symbol.clone(),
            name: name.to_string(),
            price: snapshot.price(),
            change: snapshot.regular_market_change_percent,
            degraded: snapshot.degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("object expected"),
        }
    }

    #[test]
    fn test_from_provider_fields() {
        let snapshot = QuoteSnapshot::from_provider_fields(
            "TCS.NS",
            fields(json!({
                "symbol": "TCS.NS",
                "longName": "Tata Consultancy Services Limited",
                "currentPrice": 3850.5,
                "regularMarketPrice": 3850.5,
                "regularMarketChangePercent": -0.42,
                "currency": "INR"
            })),
        );

        assert_eq!(snapshot.symbol, "TCS.NS");
        assert_eq!(
            snapshot.long_name.as_deref(),
            Some("Tata Consultancy Services Limited")
        );
        assert_eq!(snapshot.current_price, Some(3850.5));
        assert_eq!(snapshot.regular_market_change_percent, Some(-0.42));
        assert!(!snapshot.degraded);
        assert_eq!(snapshot.fields.get("currency"), Some(&json!("INR")));
        assert!(!snapshot.fields.contains_key("currentPrice"));
    }

    #[test]
    fn test_from_provider_fields_fallbacks() {
        let snapshot = QuoteSnapshot::from_provider_fields(
            "^NSEI",
            fields(json!({ "shortName": "NIFTY 50", "regularMarketPrice": 22000.0 })),
        );

        assert_eq!(snapshot.symbol, "^NSEI");
        assert_eq!(snapshot.long_name.as_deref(), Some("NIFTY 50"));
        assert_eq!(snapshot.current_price, None);
        assert_eq!(snapshot.price(), Some(22000.0));
        // 해석하지 않은 필드는 그대로 남음
        assert_eq!(snapshot.fields.get("shortName"), Some(&json!("NIFTY 50")));
    }

    #[test]
    fn test_placeholder() {
        let snapshot = QuoteSnapshot::placeholder("ZZZ.NS", 1500.0, 1.5);

        assert_eq!(snapshot.symbol, "ZZZ.NS");
        assert_eq!(snapshot.long_name.as_deref(), Some("ZZZ.NS (Mock)"));
        assert_eq!(snapshot.price(), Some(1500.0));
        assert_eq!(snapshot.regular_market_change_percent, Some(1.5));
        assert!(snapshot.degraded);
    }

    #[test]
    fn test_serde_preserves_passthrough_fields() {
        let snapshot = QuoteSnapshot::from_provider_fields(
            "GC=F",
            fields(json!({
                "regularMarketPrice": 2350.1,
                "currency": "USD",
                "fiftyTwoWeekHigh": 2450.0
            })),
        );

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["symbol"], "GC=F");
        assert_eq!(json["regularMarketPrice"], 2350.1);
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["degraded"], false);

        let decoded: QuoteSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_commodity_from_snapshot() {
        let snapshot = QuoteSnapshot::placeholder("SI=F", 1500.0, 1.5);
        let commodity = CommodityQuote::from_snapshot("Silver", &snapshot);

        assert_eq!(commodity.symbol, "SI=F");
        assert_eq!(commodity.name, "Silver");
        assert_eq!(commodity.price, Some(1500.0));
        assert_eq!(commodity.change, Some(1.5));
        assert!(commodity.degraded);
    }
}
