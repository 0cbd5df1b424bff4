// HTTP 处理器模块 (薄层: 提取操作者 → 委托服务 → 包装 R<T>)

pub mod compensation;
pub mod encashment;
pub mod genealogy;
pub mod pin;
pub mod purchase;
