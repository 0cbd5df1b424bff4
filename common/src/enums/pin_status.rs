use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 注册 pin 状态枚举
///
/// unused → used 只允许发生一次, 由行锁保证
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum PinStatus {
    /// 未使用 (0)
    #[strum(to_string = "unused")]
    Unused = 0,
    /// 已使用 (1)
    #[strum(to_string = "used")]
    Used = 1,
}

impl PinStatus {
    pub fn get_code(self) -> i32 {
        self as i32
    }

    pub fn from_code(value: i32) -> Option<Self> {
        Self::iter().find(|e| e.get_code() == value)
    }
}
