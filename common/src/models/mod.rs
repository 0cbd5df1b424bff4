// 数据模型模块 (请求/响应结构)

pub mod dto;
pub mod req;
