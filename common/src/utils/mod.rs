// 工具模块

pub mod redis_util;
pub mod sequence_util;
