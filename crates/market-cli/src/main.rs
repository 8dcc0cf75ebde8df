//! 캐시 기반 시세 조회 CLI.

use anyhow::Context;
use clap::Parser;
use market_cli::{commands, Cli};
use market_core::config::AppConfig;
use market_core::error::MarketError;
use market_core::logging::{init_logging, LogConfig};
use market_data::{build_cache, MarketDataService, YahooProvider};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 설정 로드
    let path = cli
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new("config/market.toml"));
    let mut config = AppConfig::load(Some(path)).context("설정 로드 실패")?;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    // 로깅 초기화
    init_logging(LogConfig::from(&config.logging))?;

    tracing::debug!(
        cache_backend = ?config.cache.backend,
        upstream = %config.upstream.base_url,
        "설정 로드 완료"
    );

    let cache = build_cache(&config).context("캐시 저장소 생성 실패")?;
    let provider = Arc::new(YahooProvider::new(&config.upstream).context("업스트림 제공자 생성 실패")?);
    let service = MarketDataService::new(cache, provider, &config);

    // 명령 실행
    let output = match commands::run(&service, cli.command).await {
        Ok(output) => output,
        Err(e) if e.downcast_ref::<MarketError>().is_some_and(MarketError::is_client_error) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
        Err(e) => return Err(e),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    service.stats().log_summary("market");

    Ok(())
}
