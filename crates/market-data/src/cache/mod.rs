//! 캐시 저장소.
//!
//! 파이프라인은 [`CacheStore`] trait 객체를 주입받아 사용합니다.
//! 값은 하나의 JSON 문자열로 통째로 저장되며, 필드 단위 부분 쓰기는 없습니다.
//!
//! - [`RedisCache`]: 외부 Redis (운영)
//! - [`MemoryCache`]: 프로세스 내부 TTL 맵 (개발/테스트)
//! - [`NoopCache`]: 항상 비어 있는 캐시 (캐시 비활성화)

mod memory;
mod policy;
mod redis;

pub use self::memory::MemoryCache;
pub use self::policy::{CacheKey, CachePolicy};
pub use self::redis::RedisCache;

use async_trait::async_trait;
use market_core::config::{AppConfig, CacheBackend};
use std::sync::Arc;
use tracing::info;

use crate::error::Result;

/// 키-값 캐시 저장소 계약.
///
/// `get`은 키가 없을 때 `Ok(None)`, 저장소 오류일 때 `Err`를 반환하여
/// 두 경우를 구분할 수 있어야 합니다.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 저장소 이름 (로그용).
    fn name(&self) -> &'static str;

    /// 직렬화된 값을 조회합니다.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// 만료 시간(초)과 함께 값을 덮어씁니다.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// 키를 삭제합니다. 실제로 삭제된 경우 `true`.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// 저장소 상태를 확인합니다.
    async fn ping(&self) -> Result<bool>;
}

/// 캐시 조회 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<T> {
    /// 유효한 값이 있음
    Hit(T),
    /// 값이 없음
    Miss,
    /// 저장소 오류, 타임아웃, 손상된 값 (이번 호출은 캐시 쓰기를 건너뜀)
    Unavailable(String),
}

impl<T> CacheLookup<T> {
    /// 캐시 쓰기를 시도해도 되는지 여부.
    pub fn allows_write_back(&self) -> bool {
        matches!(self, CacheLookup::Miss)
    }
}

/// 캐시를 사용하지 않는 저장소.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl CacheStore for NoopCache {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_with_expiry(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn ping(&self) -> Result<bool> {
        Ok(true)
    }
}

/// 설정에 따라 캐시 저장소를 생성합니다.
///
/// Redis 연결은 첫 사용 시점에 맺어지므로 Redis가 내려가 있어도 생성은 성공합니다.
/// URL 형식이 잘못된 경우에만 오류를 반환합니다.
pub fn build_cache(config: &AppConfig) -> Result<Arc<dyn CacheStore>> {
    let cache: Arc<dyn CacheStore> = match config.cache.backend {
        CacheBackend::Redis => Arc::new(RedisCache::new(&config.redis.url)?),
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Disabled => Arc::new(NoopCache),
    };

    info!(backend = cache.name(), "Cache store configured");
    Ok(cache)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_write_back() {
        assert!(CacheLookup::<()>::Miss.allows_write_back());
        assert!(!CacheLookup::Hit(1).allows_write_back());
        assert!(!CacheLookup::<()>::Unavailable("down".into()).allows_write_back());
    }

    #[tokio::test]
    async fn test_noop_cache() {
        let cache = NoopCache;
        cache.set_with_expiry("k", "v", 60).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(!cache.delete("k").await.unwrap());
        assert!(cache.ping().await.unwrap());
    }

    #[test]
    fn test_build_cache_backends() {
        let mut config = AppConfig::default();

        config.cache.backend = CacheBackend::Memory;
        assert_eq!(build_cache(&config).unwrap().name(), "memory");

        config.cache.backend = CacheBackend::Disabled;
        assert_eq!(build_cache(&config).unwrap().name(), "noop");

        config.cache.backend = CacheBackend::Redis;
        assert_eq!(build_cache(&config).unwrap().name(), "redis");

        config.redis.url = "not-a-url".to_string();
        assert!(build_cache(&config).is_err());
    }
}
