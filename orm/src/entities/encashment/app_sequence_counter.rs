use rbatis::crud;
use serde::{Deserialize, Serialize};

/// 单号序列计数表
///
/// 每 (kind, year, month) 一行, 发号时 SELECT ... FOR UPDATE 串行递增,
/// 避免并发下 "取最后一条 + 1" 的重号问题
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSequenceCounter {
    pub id: Option<i64>,
    /// encashment / voucher
    pub kind: String,
    pub year: i32,
    pub month: i32,
    /// 当月已发出的最大序号
    pub value: i64,
}

crud!(AppSequenceCounter {}, "app_sequence_counter");

impl AppSequenceCounter {
    pub const TABLE_NAME: &'static str = "app_sequence_counter";
}
