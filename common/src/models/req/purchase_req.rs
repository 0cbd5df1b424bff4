use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// POS 下单请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePurchaseReq {
    /// 买家会员账户
    pub buyer_account_id: i64,
    pub payment_method: String,
    /// 订单来源: pos / online
    #[serde(default = "default_source")]
    pub source: String,
    pub items: Vec<PurchaseItemReq>,
}

fn default_source() -> String {
    "pos".to_string()
}

/// 订单明细行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseItemReq {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// 标记已付款请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkPaidReq {
    /// 可选: 覆盖付款方式
    pub payment_method: Option<String>,
}

/// 放货完成请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleasePurchaseReq {
    /// 收货人姓名 (必填)
    pub received_by: String,
}

/// 批量操作请求 (逐单处理, 返回每单结果)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkPurchaseReq {
    pub purchase_ids: Vec<i64>,
    /// 批量放货时的收货人姓名
    pub received_by: Option<String>,
    /// 批量标记付款时的付款方式
    pub payment_method: Option<String>,
}
