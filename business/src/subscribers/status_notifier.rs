use std::sync::Arc;

use async_trait::async_trait;
use common::error::AppError;
use common::mq::message_queue::Message;
use common::mq::subscriber_trait::MessageSubscriber;
use orm::entities::AppMember;
use rbatis::RBatis;

/// 状态变更通知订阅者
///
/// 核心事务提交后消费状态变更事件, 对接外部通知渠道;
/// 通知属于尽力而为的副作用, 失败不影响已提交的业务数据
#[derive(Clone)]
pub struct StatusNotifier {
    rb: Arc<RBatis>,
    topic: &'static str,
}

impl StatusNotifier {
    pub fn purchase(rb: Arc<RBatis>) -> Self {
        Self { rb, topic: "purchase.status_changed" }
    }

    pub fn encashment(rb: Arc<RBatis>) -> Self {
        Self { rb, topic: "encashment.status_changed" }
    }

    pub fn placement(rb: Arc<RBatis>) -> Self {
        Self { rb, topic: "genealogy.placed" }
    }
}

#[async_trait]
impl MessageSubscriber for StatusNotifier {
    fn topic(&self) -> &str {
        self.topic
    }

    async fn handle(&self, message: Message) -> Result<(), AppError> {
        log::info!("🔔 [{}] 收到事件: {}", self.topic, message.payload);

        // 提现事件带 member_id, 解析出收件人邮箱
        if let Some(member_id) = message.payload.get("member_id").and_then(|v| v.as_i64()) {
            match AppMember::select_by_id(self.rb.as_ref(), member_id).await {
                Ok(Some(member)) => {
                    log::info!(
                        "   📧 通知会员 {} ({})",
                        member_id,
                        member.email.as_deref().unwrap_or("无邮箱")
                    );
                }
                Ok(None) => log::warn!("   ⚠️ 会员 {} 不存在, 跳过通知", member_id),
                Err(e) => log::error!("   ❌ 会员查询失败: {}", e),
            }
        }

        Ok(())
    }
}
