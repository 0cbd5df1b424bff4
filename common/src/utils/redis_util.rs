use crate::error::AppError;
use deadpool_redis::{redis::cmd, Config, Connection, Pool, Runtime};

/// Redis 工具类 - 封装 deadpool-redis 连接池
#[derive(Clone)]
pub struct RedisUtil {
    pool: Pool,
}

impl RedisUtil {
    /// 从 URL 创建 Redis 连接池
    pub fn from_url(url: String) -> Result<Self, AppError> {
        log::info!("Initializing Redis connection pool");

        let cfg = Config::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| AppError::RedisError(format!("Failed to create Redis pool: {}", e)))?;

        log::info!("✅ Redis connection pool initialized successfully");

        Ok(RedisUtil { pool })
    }

    async fn conn(&self) -> Result<Connection, AppError> {
        self.pool
            .get()
            .await
            .map_err(|e| AppError::RedisError(format!("Redis connection error: {}", e)))
    }

    /// GET - 获取键值
    pub async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = cmd("GET")
            .arg(&[key])
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis GET error: {}", e)))?;
        Ok(value)
    }

    /// SETEX - 设置带过期时间的键值 (秒)
    pub async fn set_ex(&self, key: &str, value: &str, seconds: i64) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        cmd("SETEX")
            .arg(&[key, &seconds.to_string(), value])
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis SETEX error: {}", e)))?;
        Ok(())
    }

    /// DEL - 删除键
    pub async fn del(&self, key: &str) -> Result<bool, AppError> {
        let mut conn = self.conn().await?;
        let deleted: i32 = cmd("DEL")
            .arg(&[key])
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis DEL error: {}", e)))?;
        Ok(deleted > 0)
    }

    // ==================== Redis Stream Operations ====================

    /// XADD - 添加消息到 Stream, 返回消息ID
    pub async fn xadd(
        &self,
        stream: &str,
        id: &str, // "*" 表示自动生成ID
        fields: &[(&str, &str)],
    ) -> Result<String, AppError> {
        let mut conn = self.conn().await?;

        let mut command = cmd("XADD");
        command.arg(stream).arg(id);
        for (key, value) in fields {
            command.arg(key).arg(value);
        }

        let message_id: String = command
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis XADD error: {}", e)))?;

        Ok(message_id)
    }

    /// XGROUP CREATE - 创建消费者组
    pub async fn xgroup_create(&self, stream: &str, group: &str, id: &str) -> Result<(), AppError> {
        let mut conn = self.conn().await?;

        let _: String = cmd("XGROUP")
            .arg("CREATE")
            .arg(stream)
            .arg(group)
            .arg(id)
            .arg("MKSTREAM") // 如果 stream 不存在则创建
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                if e.to_string().contains("BUSYGROUP") {
                    return AppError::RedisError("Consumer group already exists".to_string());
                }
                AppError::RedisError(format!("Redis XGROUP CREATE error: {}", e))
            })?;

        Ok(())
    }

    /// XREADGROUP - 消费者组读取消息
    pub async fn xreadgroup(
        &self,
        group: &str,
        consumer: &str,
        stream: &str,
        count: usize,
    ) -> Result<Vec<(String, Vec<(String, String)>)>, AppError> {
        let mut conn = self.conn().await?;

        let result: Vec<(String, Vec<(String, Vec<(String, String)>)>)> = cmd("XREADGROUP")
            .arg("GROUP")
            .arg(group)
            .arg(consumer)
            .arg("COUNT")
            .arg(count)
            .arg("STREAMS")
            .arg(stream)
            .arg(">") // ">" 表示只读取未被消费的新消息
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis XREADGROUP error: {}", e)))?;

        let messages = if let Some((_, stream_messages)) = result.first() {
            stream_messages.clone()
        } else {
            vec![]
        };

        Ok(messages)
    }

    /// XACK - 确认消息
    pub async fn xack(&self, stream: &str, group: &str, message_id: &str) -> Result<i32, AppError> {
        let mut conn = self.conn().await?;
        let acked: i32 = cmd("XACK")
            .arg(stream)
            .arg(group)
            .arg(message_id)
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis XACK error: {}", e)))?;
        Ok(acked)
    }

    /// XDEL - 删除消息
    pub async fn xdel(&self, stream: &str, message_ids: &[&str]) -> Result<i32, AppError> {
        let mut conn = self.conn().await?;
        let mut command = cmd("XDEL");
        command.arg(stream);
        for id in message_ids {
            command.arg(id);
        }
        let deleted: i32 = command
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis XDEL error: {}", e)))?;
        Ok(deleted)
    }
}
