//! 시세 조회 명령.

use anyhow::Result;
use market_core::types::{BarInterval, HistoryPeriod};
use market_data::MarketDataService;
use serde_json::Value;
use tracing::info;

pub(super) async fn snapshot(service: &MarketDataService, symbol: &str) -> Result<Value> {
    let snapshot = service.get_snapshot(symbol).await;
    Ok(serde_json::to_value(snapshot)?)
}

pub(super) async fn history(
    service: &MarketDataService,
    symbol: &str,
    period: HistoryPeriod,
    interval: BarInterval,
) -> Result<Value> {
    let bars = service.get_history(symbol, period, interval).await;
    info!(symbol = %symbol, count = bars.len(), "과거 시세 조회 완료");
    Ok(serde_json::to_value(bars)?)
}

pub(super) async fn search(service: &MarketDataService, query: &str) -> Result<Value> {
    let candidates = service.search_symbols(query).await;
    info!(query = %query, count = candidates.len(), "종목 검색 완료");
    Ok(serde_json::to_value(candidates)?)
}

pub(super) async fn commodities(service: &MarketDataService) -> Result<Value> {
    let commodities = service.get_commodities().await;
    Ok(serde_json::to_value(commodities)?)
}

pub(super) async fn news(service: &MarketDataService, symbol: Option<&str>) -> Result<Value> {
    let news = service.get_market_news(symbol).await;
    info!(count = news.len(), "뉴스 조회 완료");
    Ok(serde_json::to_value(news)?)
}
