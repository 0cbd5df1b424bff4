use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 提现申请状态枚举
///
/// pending → approved → processed → released;
/// rejected 仅能从 pending 进入; cancelled 为管理终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum EncashmentStatus {
    /// 待审批 (0)
    #[strum(to_string = "pending")]
    Pending = 0,
    /// 已审批 (1)
    #[strum(to_string = "approved")]
    Approved = 1,
    /// 财务已处理 (2)
    #[strum(to_string = "processed")]
    Processed = 2,
    /// 已放款 (3)
    #[strum(to_string = "released")]
    Released = 3,
    /// 已驳回 (8)
    #[strum(to_string = "rejected")]
    Rejected = 8,
    /// 已取消 (9)
    #[strum(to_string = "cancelled")]
    Cancelled = 9,
}

impl EncashmentStatus {
    /// 转换为 i32 值
    pub fn get_code(self) -> i32 {
        self as i32
    }

    /// 从 i32 值转换
    pub fn from_code(value: i32) -> Option<Self> {
        Self::iter().find(|e| e.get_code() == value)
    }

    /// 判断状态流转是否合法
    pub fn can_transition(self, to: EncashmentStatus) -> bool {
        use EncashmentStatus::*;
        matches!(
            (self, to),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Processed) | (Processed, Released)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_branches() {
        use EncashmentStatus::*;
        assert!(Pending.can_transition(Approved));
        assert!(Pending.can_transition(Rejected));
        assert!(!Pending.can_transition(Processed));
        assert!(!Pending.can_transition(Released));
    }

    #[test]
    fn test_strict_forward_chain() {
        use EncashmentStatus::*;
        assert!(Approved.can_transition(Processed));
        assert!(Processed.can_transition(Released));
        assert!(!Approved.can_transition(Released));
        assert!(!Rejected.can_transition(Approved));
        assert!(!Released.can_transition(Processed));
    }
}
