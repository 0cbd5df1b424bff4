use rbatis::rbdc::datetime::DateTime;
use rbatis::crud;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 配对收益记录表 (只追加账本)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppIncomeHistory {
    pub id: Option<i64>,
    /// 受益会员账户 (触发配对的祖先)
    pub member_account_id: i64,
    /// pairing / referral
    pub source: Option<String>,
    pub amount: Option<Decimal>,
    /// 触发节点相对祖先的层距
    pub level: Option<i32>,
    /// 触发配对的新节点
    pub node_id: Option<i64>,
    pub description: Option<String>,
    pub create_time: Option<DateTime>,
}

crud!(AppIncomeHistory {}, "app_income_history");

impl AppIncomeHistory {
    pub const TABLE_NAME: &'static str = "app_income_history";
}
