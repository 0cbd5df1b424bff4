use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 双轨树槽位枚举
///
/// 同一父节点下 left / right 各至多一个子节点; 找空位时恒先左后右
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum Position {
    #[strum(to_string = "left")]
    Left,
    #[strum(to_string = "right")]
    Right,
}

impl Position {
    /// 从字符串编码转换
    pub fn from_code(value: &str) -> Option<Self> {
        Self::iter().find(|e| e.as_ref() == value)
    }
}
