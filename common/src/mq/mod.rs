pub mod message_queue;
pub mod subscriber_trait;

pub use message_queue::{Message, MessageQueue};
pub use subscriber_trait::MessageSubscriber;

/// 辅助函数：注册单个订阅者
pub async fn register_subscriber<T: MessageSubscriber + Clone + 'static>(
    mq: &MessageQueue,
    subscriber: T,
) {
    let topic = subscriber.topic().to_string();

    mq.subscribe(&topic, move |msg| {
        let sub = subscriber.clone();
        Box::pin(async move { sub.handle(msg).await })
    })
    .await;

    log::info!("   ✅ Registered subscriber for topic: '{}'", topic);
}
