use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 提现付款方式枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum PaymentType {
    #[strum(to_string = "voucher")]
    Voucher,
    #[strum(to_string = "cheque")]
    Cheque,
    #[strum(to_string = "bank_transfer")]
    BankTransfer,
}

impl PaymentType {
    /// 从字符串编码转换
    pub fn from_code(value: &str) -> Option<Self> {
        Self::iter().find(|e| e.as_ref() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(PaymentType::from_code("cheque"), Some(PaymentType::Cheque));
        assert_eq!(PaymentType::from_code("cash"), None);
    }
}
