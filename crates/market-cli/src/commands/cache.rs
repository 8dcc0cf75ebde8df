//! 캐시 관리 명령.

use anyhow::Result;
use market_core::types::{BarInterval, HistoryPeriod};
use market_data::MarketDataService;
use serde_json::{json, Value};

pub(super) async fn invalidate(
    service: &MarketDataService,
    symbol: &str,
    history: Option<(HistoryPeriod, BarInterval)>,
) -> Result<Value> {
    let removed = service.invalidate(symbol, history).await;
    Ok(json!({ "symbol": symbol, "removed": removed }))
}

pub(super) async fn health(service: &MarketDataService) -> Result<Value> {
    let healthy = service.cache_health().await;
    Ok(json!({ "backend": service.cache_backend(), "healthy": healthy }))
}
