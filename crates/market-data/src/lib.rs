//! 캐시 기반 시세 데이터 파이프라인.
//!
//! 이 crate는 다음을 제공합니다:
//! - 캐시 저장소 추상화 (Redis, 인메모리)
//! - 캐시 키/TTL 정책
//! - 업스트림 제공자 추상화와 Yahoo Finance 클라이언트
//! - 시세 스냅샷, 과거 시세, 종목 검색을 위한 read-through 파이프라인
//! - 파이프라인 통계

pub mod cache;
pub mod catalog;
pub mod error;
pub mod provider;
pub mod service;
pub mod stats;

pub use error::{DataError, Result};

// 캐시 재내보내기
pub use cache::{
    build_cache, CacheKey, CacheLookup, CachePolicy, CacheStore, MemoryCache, NoopCache,
    RedisCache,
};

// 제공자 재내보내기
pub use provider::{BatchQuotes, FastQuote, HistoryRow, ProviderError, QuoteProvider, YahooProvider};

// 파이프라인 재내보내기
pub use service::MarketDataService;
pub use stats::{PipelineStats, StatsSnapshot};
