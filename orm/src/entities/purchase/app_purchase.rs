use rbatis::rbdc::datetime::DateTime;
use rbatis::crud;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 销售订单表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPurchase {
    pub id: Option<i64>,
    /// 交易号 (唯一)
    pub transaction_no: Option<String>,
    /// 下单收银员
    pub cashier_id: Option<i64>,
    /// 买家会员账户
    pub buyer_account_id: i64,
    pub total_amount: Decimal,
    pub payment_method: Option<String>,
    /// 见 PurchaseStatus
    pub status: Option<i32>,
    pub paid_time: Option<DateTime>,
    pub released_time: Option<DateTime>,
    /// 收货人姓名 (完成时必填)
    pub received_by: Option<String>,
    /// pos / online
    pub source: Option<String>,
    pub create_time: Option<DateTime>,
}

crud!(AppPurchase {}, "app_purchase");

impl AppPurchase {
    pub const TABLE_NAME: &'static str = "app_purchase";
}
