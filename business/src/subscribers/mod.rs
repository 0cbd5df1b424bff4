pub mod status_notifier;

use actix_web::web;
use common::mq::register_subscriber;

use crate::state::AppState;
use crate::subscribers::status_notifier::StatusNotifier;

/// 注册所有消息队列订阅者
pub async fn init_subscribers(state: web::Data<AppState>) {
    log::info!("📋 Initializing message queue subscribers...");

    register_subscriber(&state.mq, StatusNotifier::purchase(state.rb.clone())).await;
    register_subscriber(&state.mq, StatusNotifier::encashment(state.rb.clone())).await;
    register_subscriber(&state.mq, StatusNotifier::placement(state.rb.clone())).await;

    log::info!("✅ All message queue subscribers initialized successfully (3 subscribers)");
}
