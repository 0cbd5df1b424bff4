use rbatis::rbdc::datetime::DateTime;
use rbatis::crud;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 订单明细表
///
/// subtotal = quantity × unit_price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPurchaseItem {
    pub id: Option<i64>,
    pub purchase_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub create_time: Option<DateTime>,
}

crud!(AppPurchaseItem {}, "app_purchase_item");

impl AppPurchaseItem {
    pub const TABLE_NAME: &'static str = "app_purchase_item";
}
