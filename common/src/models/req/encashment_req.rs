use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 提现申请请求 (会员发起)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEncashmentReq {
    pub amount: Decimal,
    /// 付款方式: voucher / cheque / bank_transfer
    pub payment_type: String,
    pub member_notes: Option<String>,
}

/// 驳回请求 (管理员)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectEncashmentReq {
    /// 驳回原因 (必填)
    pub reason: String,
    pub admin_notes: Option<String>,
}

/// 财务处理请求 (出纳凭证)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessEncashmentReq {
    /// 可选: 覆盖付款方式
    pub payment_type: Option<String>,
    pub accounting_notes: Option<String>,
}

/// 放款请求 (柜台)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseEncashmentReq {
    /// 领款人姓名 (必填)
    pub received_by_name: String,
    pub cashier_notes: Option<String>,
}
