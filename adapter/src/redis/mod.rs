use redis::{aio::MultiplexedConnection, AsyncCommands};
use shared::{config::RedisConfig, error::AppResult};

pub mod model;

use self::model::RedisKey;

// トークンの発行・失効はこのスコープの外で行われるため、
// このクライアントは参照専用にしている
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = redis::Client::open(format!("redis://{}:{}", config.host, config.port))?;
        Ok(Self { client })
    }

    pub async fn get<T: RedisKey>(&self, key: &T) -> AppResult<Option<T::Value>> {
        let mut conn = self.connect().await?;
        let result: Option<String> = conn.get(key.inner()).await?;
        result.map(T::Value::try_from).transpose()
    }

    async fn connect(&self) -> AppResult<MultiplexedConnection> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }
}
