//! 파이프라인 통계.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// 파이프라인 카운터. 여러 요청이 동시에 갱신합니다.
#[derive(Debug, Default)]
pub struct PipelineStats {
    hits: AtomicU64,
    misses: AtomicU64,
    cache_unavailable: AtomicU64,
    upstream_failures: AtomicU64,
    degraded: AtomicU64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_unavailable(&self) {
        self.cache_unavailable.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_upstream_failure(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_degraded(&self) {
        self.degraded.fetch_add(1, Ordering::Relaxed);
    }

    /// 현재 값을 읽습니다.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            cache_unavailable: self.cache_unavailable.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            degraded: self.degraded.load(Ordering::Relaxed),
        }
    }
}

/// 통계 스냅샷.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// 캐시 적중
    pub hits: u64,
    /// 캐시 미스
    pub misses: u64,
    /// 캐시 사용 불가 (오류, 타임아웃, 손상된 값)
    pub cache_unavailable: u64,
    /// 업스트림 실패
    pub upstream_failures: u64,
    /// 대체 데이터 응답
    pub degraded: u64,
}

impl StatsSnapshot {
    /// 캐시 적중률 (0.0 ~ 1.0). 캐시 사용 불가 조회도 분모에 포함합니다.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.cache_unavailable;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            hits = self.hits,
            misses = self.misses,
            cache_unavailable = self.cache_unavailable,
            upstream_failures = self.upstream_failures,
            degraded = self.degraded,
            hit_rate = format!("{:.1}%", self.hit_rate() * 100.0),
            "파이프라인 통계"
        );
    }
}
