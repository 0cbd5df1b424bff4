// 公共模块
// 提供数据库、Redis、日志、错误处理等通用功能

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod logger;
pub mod middleware;
pub mod models;
pub mod mq;
pub mod response;
pub mod utils;

// 重新导出常用类型和函数
pub use config::{AppConfig, DbConfig, RedisConfig};
pub use error::{AppError, AppResult};
pub use logger::{init_logger, init_logger_with_level};

// 数据库相关
pub use config::db_conf::{get_db, init_db, test_connection as test_db_connection};

// 消息队列相关
pub use mq::{Message, MessageQueue};

/// 初始化公共模块
///
/// 这个函数可以用来初始化日志系统
pub fn init() {
    logger::init_logger();
    log::info!("✅ 公共模块初始化完成");
}
