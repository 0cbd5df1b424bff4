use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 收益来源枚举 (佣金表 / 收益记录表的 source 字段)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum IncomeSource {
    /// 双轨配对奖金
    #[strum(to_string = "pairing")]
    Pairing,
    /// 层级佣金
    #[strum(to_string = "unilevel")]
    Unilevel,
    /// 直推奖金
    #[strum(to_string = "referral")]
    Referral,
}

impl IncomeSource {
    /// 从字符串编码转换
    pub fn from_code(value: &str) -> Option<Self> {
        Self::iter().find(|e| e.as_ref() == value)
    }
}
