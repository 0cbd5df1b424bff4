use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 销售订单状态枚举
///
/// 状态只能沿 pending → for_payment → for_release → completed 前进,
/// 或从任意非终态进入 cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum PurchaseStatus {
    /// 待处理 (0)
    #[strum(to_string = "pending")]
    Pending = 0,
    /// 待付款 (1)
    #[strum(to_string = "for_payment")]
    ForPayment = 1,
    /// 已付款待放货 (2)
    #[strum(to_string = "for_release")]
    ForRelease = 2,
    /// 已完成 (3)
    #[strum(to_string = "completed")]
    Completed = 3,
    /// 已取消 (9)
    #[strum(to_string = "cancelled")]
    Cancelled = 9,
}

impl PurchaseStatus {
    /// 转换为 i32 值
    pub fn get_code(self) -> i32 {
        self as i32
    }

    /// 从 i32 值转换
    pub fn from_code(value: i32) -> Option<Self> {
        Self::iter().find(|e| e.get_code() == value)
    }

    /// 是否终态
    pub fn is_terminal(self) -> bool {
        matches!(self, PurchaseStatus::Completed | PurchaseStatus::Cancelled)
    }

    /// 判断状态流转是否合法
    pub fn can_transition(self, to: PurchaseStatus) -> bool {
        use PurchaseStatus::*;
        match (self, to) {
            (Pending, ForPayment) => true,
            // 标记付款: pending 或 for_payment 均可直接进入 for_release
            (Pending, ForRelease) | (ForPayment, ForRelease) => true,
            (ForRelease, Completed) => true,
            // 非终态均可取消
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_only() {
        use PurchaseStatus::*;
        assert!(Pending.can_transition(ForPayment));
        assert!(Pending.can_transition(ForRelease));
        assert!(ForPayment.can_transition(ForRelease));
        assert!(ForRelease.can_transition(Completed));
        assert!(!ForRelease.can_transition(ForPayment));
        assert!(!Completed.can_transition(ForRelease));
        assert!(!Pending.can_transition(Completed));
    }

    #[test]
    fn test_cancel_boundary() {
        use PurchaseStatus::*;
        assert!(Pending.can_transition(Cancelled));
        assert!(ForPayment.can_transition(Cancelled));
        assert!(ForRelease.can_transition(Cancelled));
        assert!(!Completed.can_transition(Cancelled));
        assert!(!Cancelled.can_transition(Cancelled));
    }

    #[test]
    fn test_code_roundtrip() {
        assert_eq!(PurchaseStatus::from_code(2), Some(PurchaseStatus::ForRelease));
        assert_eq!(PurchaseStatus::from_code(9), Some(PurchaseStatus::Cancelled));
        assert_eq!(PurchaseStatus::from_code(42), None);
    }
}
