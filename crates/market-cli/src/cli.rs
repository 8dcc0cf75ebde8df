//! 명령줄 인자 정의.

use clap::{Parser, Subcommand};
use market_core::types::{BarInterval, HistoryPeriod};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "market")]
#[command(about = "캐시 기반 시세 조회 CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 설정 파일 경로 (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error). 설정 파일보다 우선합니다.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// 시세 스냅샷 조회
    Snapshot {
        /// 심볼 (예: RELIANCE.NS, ^NSEI, GC=F)
        symbol: String,
    },

    /// 과거 시세 조회
    History {
        symbol: String,

        /// 조회 기간 (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)
        #[arg(long, default_value_t = HistoryPeriod::default())]
        period: HistoryPeriod,

        /// 캔들 간격 (1m, 5m, 15m, 1h, 1d, 1wk, 1mo 등)
        #[arg(long, default_value_t = BarInterval::default())]
        interval: BarInterval,
    },

    /// 종목 검색
    Search {
        /// 심볼 또는 이름 일부
        query: String,
    },

    /// 원자재 시세 (금, 은, 원유)
    Commodities,

    /// 시장 뉴스
    News {
        /// 대상 심볼 (기본: 설정의 대표 지수)
        #[arg(long)]
        symbol: Option<String>,
    },

    /// 캐시 무효화
    Invalidate {
        symbol: String,

        /// 함께 삭제할 과거 시세 기간 (--interval과 함께 사용)
        #[arg(long, requires = "interval")]
        period: Option<HistoryPeriod>,

        /// 함께 삭제할 과거 시세 간격 (--period와 함께 사용)
        #[arg(long, requires = "period")]
        interval: Option<BarInterval>,
    },

    /// 캐시 저장소 상태 확인
    Health,
}
