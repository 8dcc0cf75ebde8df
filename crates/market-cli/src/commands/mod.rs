//! 서브커맨드 실행.

mod cache;
mod quotes;

use anyhow::Result;
use market_core::types::validate_symbol;
use market_data::MarketDataService;
use serde_json::Value;

use crate::cli::Commands;

/// 명령을 실행하고 출력할 JSON 값을 반환합니다.
///
/// 파이프라인 작업은 실패하지 않으므로 오류는 입력 검증에서만 발생합니다.
pub async fn run(service: &MarketDataService, command: Commands) -> Result<Value> {
    match command {
        Commands::Snapshot { symbol } => {
            validate_symbol(&symbol)?;
            quotes::snapshot(service, &symbol).await
        }
        Commands::History {
            symbol,
            period,
            interval,
        } => {
            validate_symbol(&symbol)?;
            quotes::history(service, &symbol, period, interval).await
        }
        Commands::Search { query } => quotes::search(service, &query).await,
        Commands::Commodities => quotes::commodities(service).await,
        Commands::News { symbol } => {
            if let Some(symbol) = &symbol {
                validate_symbol(symbol)?;
            }
            quotes::news(service, symbol.as_deref()).await
        }
        Commands::Invalidate {
            symbol,
            period,
            interval,
        } => {
            validate_symbol(&symbol)?;
            let history = period.zip(interval);
            cache::invalidate(service, &symbol, history).await
        }
        Commands::Health => cache::health(service).await,
    }
}
