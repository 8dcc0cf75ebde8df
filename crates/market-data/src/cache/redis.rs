//! Redis 캐시 구현.
//!
//! 연결은 `ConnectionManager`로 관리합니다. 매니저는 내부적으로 멀티플렉싱되고
//! 끊어지면 재연결하므로, 호출마다 복제해서 사용하며 락을 잡지 않습니다.

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::CacheStore;
use crate::error::{DataError, Result};

/// 연결 시도당 타임아웃.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis 캐시 저장소.
pub struct RedisCache {
    client: Client,
    connection: OnceCell<ConnectionManager>,
}

impl RedisCache {
    /// Redis 캐시를 생성합니다.
    ///
    /// 실제 연결은 첫 명령 실행 시 맺습니다.
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| DataError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
        })
    }

    /// 연결 매니저를 가져옵니다. 연결 실패는 다음 호출에서 다시 시도합니다.
    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                info!("Connecting to Redis...");
                let config = ConnectionManagerConfig::new()
                    .set_number_of_retries(1)
                    .set_connection_timeout(CONNECT_TIMEOUT);
                let manager = ConnectionManager::new_with_config(self.client.clone(), config)
                    .await
                    .map_err(|e| DataError::ConnectionError(e.to_string()))?;
                info!("Redis connection established");
                Ok::<_, DataError>(manager)
            })
            .await?;

        Ok(manager.clone())
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, value, ttl_secs).await?;
        debug!(key = %key, ttl_secs, "Cache entry written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let deleted: i64 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    async fn ping(&self) -> Result<bool> {
        let mut conn = self.connection().await?;
        let result: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(result == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            RedisCache::new("http://localhost"),
            Err(DataError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_error() {
        // 예약된 포트 0에는 연결할 수 없음
        let cache = RedisCache::new("redis://127.0.0.1:0/0").unwrap();
        assert!(cache.get("snapshot:TCS.NS").await.is_err());
    }

    #[tokio::test]
    #[ignore] // 로컬 Redis 필요
    async fn test_redis_roundtrip() {
        let cache = RedisCache::new("redis://localhost:6379/0").unwrap();
        assert!(cache.ping().await.unwrap());

        cache
            .set_with_expiry("test:market-data", "{\"a\":1}", 30)
            .await
            .unwrap();
        assert_eq!(
            cache.get("test:market-data").await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(cache.delete("test:market-data").await.unwrap());
        assert_eq!(cache.get("test:market-data").await.unwrap(), None);
    }
}
