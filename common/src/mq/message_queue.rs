use crate::error::AppError;
use crate::utils::redis_util::RedisUtil;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 消息结构
///
/// 核心事务提交后发布 (通知/广播属于尽力而为的副作用, 失败不回滚业务事务)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message<T = serde_json::Value> {
    pub id: Option<String>,
    pub topic: String,
    pub payload: T,
    pub timestamp: i64,
}

impl<T> Message<T> {
    pub fn new(topic: impl Into<String>, payload: T) -> Self {
        Message {
            id: None,
            topic: topic.into(),
            payload,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// 消息处理器类型 - 接收消息并返回 Future
pub type MessageHandler = Arc<
    dyn Fn(Message<serde_json::Value>) -> Pin<Box<dyn Future<Output = Result<(), AppError>> + Send>>
        + Send
        + Sync,
>;

/// 订阅者信息
struct Subscriber {
    topic: String,
    handler: MessageHandler,
}

/// 消息队列 - 基于 Redis Stream（发布-订阅模式）
#[derive(Clone)]
pub struct MessageQueue {
    redis: Arc<RedisUtil>,
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    consumer_group: String,
}

impl MessageQueue {
    pub fn new(redis: Arc<RedisUtil>) -> Self {
        MessageQueue {
            redis,
            subscribers: Arc::new(RwLock::new(Vec::new())),
            consumer_group: "backoffice-group".to_string(),
        }
    }

    /// 订阅特定主题的消息
    pub async fn subscribe<F>(&self, topic: impl Into<String>, handler: F)
    where
        F: Fn(Message<serde_json::Value>) -> Pin<Box<dyn Future<Output = Result<(), AppError>> + Send>>
            + Send
            + Sync
            + 'static,
    {
        let topic = topic.into();
        log::info!("📌 Subscribing to topic: '{}'", topic);

        self.subscribers.write().await.push(Subscriber {
            topic,
            handler: Arc::new(handler),
        });
    }

    /// 发布消息到队列
    ///
    /// 消息发布到对应主题的 stream，格式：mq:{topic}
    pub async fn publish<T: Serialize + Sync>(&self, message: &Message<T>) -> Result<String, AppError> {
        let stream = format!("mq:{}", message.topic);

        let payload_json = serde_json::to_string(&message.payload)
            .map_err(|e| AppError::unknown(format!("Failed to serialize payload: {}", e)))?;
        let timestamp_str = message.timestamp.to_string();

        let fields = vec![
            ("topic", message.topic.as_str()),
            ("timestamp", timestamp_str.as_str()),
            ("payload", payload_json.as_str()),
        ];

        let message_id = self.redis.xadd(&stream, "*", &fields).await?;
        log::debug!("📤 Message published to topic '{}' with ID: {}", message.topic, message_id);

        Ok(message_id)
    }

    /// 启动后台消费者（自动处理订阅的消息）
    ///
    /// 根据已订阅的主题创建对应的 stream 并启动消费循环
    pub async fn start_consumer(&self) -> Result<(), AppError> {
        let redis = self.redis.clone();
        let subscribers = self.subscribers.clone();
        let group = self.consumer_group.clone();
        let consumer_name = format!("consumer-{}", uuid::Uuid::new_v4());

        let topics: Vec<String> = {
            let subs = subscribers.read().await;
            subs.iter().map(|s| s.topic.clone()).collect()
        };

        if topics.is_empty() {
            log::warn!("⚠️  No topics subscribed, consumer will not start");
            return Ok(());
        }

        for topic in &topics {
            let stream = format!("mq:{}", topic);
            self.redis.xgroup_create(&stream, &group, "0").await.ok();
        }

        log::info!("🚀 Starting background consumer for topics: {:?}", topics);

        tokio::spawn(async move {
            loop {
                for topic in &topics {
                    let stream = format!("mq:{}", topic);

                    let messages = match redis.xreadgroup(&group, &consumer_name, &stream, 10).await {
                        Ok(messages) => messages,
                        Err(e) => {
                            log::error!("❌ Failed to read from stream '{}': {}", stream, e);
                            continue;
                        }
                    };

                    for (message_id, fields) in messages {
                        let message = match Self::parse_message(&message_id, &fields) {
                            Ok(message) => message,
                            Err(e) => {
                                log::error!("❌ Failed to parse message {}: {}", message_id, e);
                                continue;
                            }
                        };

                        let handlers = {
                            let subs = subscribers.read().await;
                            subs.iter()
                                .filter(|s| s.topic == message.topic)
                                .map(|s| s.handler.clone())
                                .collect::<Vec<_>>()
                        };

                        let mut all_success = true;
                        for handler in handlers {
                            if let Err(e) = handler(message.clone()).await {
                                all_success = false;
                                log::error!("❌ Handler failed to process message {}: {}", message_id, e);
                            }
                        }

                        // 只有所有处理器都成功时才确认并删除消息
                        if all_success {
                            if let Err(e) = redis.xack(&stream, &group, &message_id).await {
                                log::error!("❌ Failed to ACK message {}: {}", message_id, e);
                            } else {
                                redis.xdel(&stream, &[&message_id]).await.ok();
                            }
                        }
                    }
                }

                // 短暂延迟避免CPU占用过高
                tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            }
        });

        Ok(())
    }

    /// 解析消息
    fn parse_message(id: &str, fields: &[(String, String)]) -> Result<Message<serde_json::Value>, AppError> {
        let mut topic = String::new();
        let mut timestamp: i64 = 0;
        let mut payload = serde_json::Value::Null;

        for (key, value) in fields {
            match key.as_str() {
                "topic" => topic = value.clone(),
                "timestamp" => timestamp = value.parse().unwrap_or(0),
                "payload" => {
                    payload = serde_json::from_str(value)
                        .map_err(|e| AppError::unknown(format!("Failed to parse payload: {}", e)))?;
                }
                _ => {}
            }
        }

        Ok(Message {
            id: Some(id.to_string()),
            topic,
            timestamp,
            payload,
        })
    }
}
