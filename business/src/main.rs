use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use common::middleware::error_handler;
use common::mq::message_queue::MessageQueue;
use common::utils::redis_util::RedisUtil;
use common::AppConfig;

mod handle;
mod service;
mod state;
mod subscribers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    // 嵌入配置文件（编译时加载）
    const DEFAULT_CONFIG: &str = include_str!("../config.toml");

    let config = AppConfig::from_file_or_embedded("business/config", DEFAULT_CONFIG)
        .expect("配置加载失败");

    // 初始化日志（使用配置的日志级别）
    std::env::set_var("RUST_LOG", &config.log.level);
    common::init_logger();

    log::info!("启动后台业务服务...");

    // 初始化数据库连接池
    let db_config = common::DbConfig::new(
        config.database.url.clone(),
        config.database.max_connections as u64,
    );
    common::init_db(&db_config).await.expect("数据库连接池初始化失败");
    if let Err(e) = common::test_db_connection().await {
        log::error!("数据库连接测试失败: {}", e);
    }
    let rb = Arc::new(common::get_db().clone());

    // 初始化 Redis 连接池
    log::info!("⚡ 初始化 Redis 连接池...");
    let redis_util = RedisUtil::from_url(config.redis.url.clone()).expect("初始化 Redis 连接池失败");
    let redis_util = Arc::new(redis_util);
    log::info!("📦 Redis 连接池已就绪");

    // redis-mq
    let mq = Arc::new(MessageQueue::new(redis_util.clone()));

    // 组装工程依赖
    let state = state::AppState::new(rb, redis_util, mq);
    let state_data = web::Data::new(state.clone());

    // 注册消息队列订阅者并启动后台消费者
    subscribers::init_subscribers(state_data.clone()).await;
    if let Err(e) = state.mq.start_consumer().await {
        log::error!("消息队列消费者启动失败: {}", e);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    log::info!("🚀 启动 Actix Web 服务器: {}", addr);
    HttpServer::new(move || {
        App::new()
            // 全局中间件配置
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            // 注册 JSON 和 Query 错误处理器
            .app_data(error_handler::json_config())
            .app_data(error_handler::query_config())
            // 注册全局数据
            .app_data(state_data.clone())
            // pin 发放
            .service(handle::pin::issue_pin)
            // 族谱
            .service(handle::genealogy::place_member)
            .service(handle::genealogy::direct_downlines)
            .service(handle::genealogy::upline)
            // 销售订单
            .service(handle::purchase::create_purchase)
            .service(handle::purchase::move_to_payment)
            .service(handle::purchase::mark_as_paid)
            .service(handle::purchase::mark_as_released)
            .service(handle::purchase::cancel)
            .service(handle::purchase::bulk_mark_as_paid)
            .service(handle::purchase::bulk_mark_as_released)
            .service(handle::purchase::bulk_cancel)
            // 提现审批
            .service(handle::encashment::create)
            .service(handle::encashment::approve)
            .service(handle::encashment::reject)
            .service(handle::encashment::process)
            .service(handle::encashment::release)
            .service(handle::encashment::list_for_member)
            // 奖金比例配置
            .service(handle::compensation::current)
            .service(handle::compensation::set_compensation)
    })
    .bind(&addr)?
    .run()
    .await
}
