use rbatis::rbdc::datetime::DateTime;
use rbatis::{crud, impl_select};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 层级佣金表 (只追加账本)
///
/// 每笔订单对每个层级祖先至多一行,
/// (purchase_id, member_account_id, level) 存储层唯一约束
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppCommission {
    pub id: Option<i64>,
    /// 受益祖先账户
    pub member_account_id: i64,
    /// unilevel / referral
    pub source: Option<String>,
    pub amount: Option<Decimal>,
    /// 与买家的层距 (1..N)
    pub level: Option<i32>,
    pub percent: Option<Decimal>,
    pub purchase_id: i64,
    pub description: Option<String>,
    pub create_time: Option<DateTime>,
}

crud!(AppCommission {}, "app_commission");
impl_select!(AppCommission{select_by_purchase_id(purchase_id: i64) => "`where purchase_id = #{purchase_id}`"});

impl AppCommission {
    pub const TABLE_NAME: &'static str = "app_commission";
}
