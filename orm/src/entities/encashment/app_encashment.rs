use rbatis::rbdc::datetime::DateTime;
use rbatis::{crud, impl_select};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 提现申请表
///
/// pending → approved → processed → released;
/// rejected 仅从 pending 进入; 每次流转由单一角色执行并记录操作者和时间
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEncashment {
    pub id: Option<i64>,
    pub member_id: i64,
    /// 提现单号 (唯一), ENC{yyyy}{mm}{seq6}
    pub encashment_no: Option<String>,
    pub amount: Decimal,
    /// 见 EncashmentStatus
    pub status: Option<i32>,
    pub member_notes: Option<String>,
    pub admin_notes: Option<String>,
    pub accounting_notes: Option<String>,
    pub cashier_notes: Option<String>,
    /// 付款凭证号 (唯一), VCH{yyyy}{mm}{seq6}, processed 时生成
    pub voucher_no: Option<String>,
    /// voucher / cheque / bank_transfer
    pub payment_type: Option<String>,
    pub approved_by: Option<i64>,
    pub approved_time: Option<DateTime>,
    pub processed_by: Option<i64>,
    pub processed_time: Option<DateTime>,
    pub released_by: Option<i64>,
    pub released_time: Option<DateTime>,
    pub received_by_name: Option<String>,
    pub received_time: Option<DateTime>,
    pub rejected_by: Option<i64>,
    pub rejected_time: Option<DateTime>,
    pub rejection_reason: Option<String>,
    pub create_time: Option<DateTime>,
}

crud!(AppEncashment {}, "app_encashment");
impl_select!(AppEncashment{select_by_member_id(member_id: i64) => "`where member_id = #{member_id} order by id desc`"});

impl AppEncashment {
    pub const TABLE_NAME: &'static str = "app_encashment";
}
