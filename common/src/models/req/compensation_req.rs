use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 奖金比例设置请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCompensationReq {
    /// 层级 → 百分比 (1..=10, 缺失层级视为 0)
    pub unilevel_percents: BTreeMap<i32, Decimal>,
    /// 单次配对奖金
    pub pairing_bonus: Decimal,
    pub remark: Option<String>,
}
