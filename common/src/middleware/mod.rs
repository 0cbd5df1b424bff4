// 中间件模块

pub mod actor;
pub mod error_handler;
