use rbatis::crud;
use rbatis::rbdc::datetime::DateTime;
use serde::{Deserialize, Serialize};

/// 注册 pin 表 (一次性安置凭证)
///
/// unused → used 仅一次, 安置事务内行锁保证; 用过即不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMemberPin {
    pub id: Option<i64>,
    /// 归属推荐人账户, 发放时可为空, 消费时回填实际安置父账户
    pub sponsor_account_id: Option<i64>,
    pub transaction_no: Option<String>,
    pub payment_method: Option<String>,
    /// 预注册会员信息 id
    pub member_id: Option<i64>,
    pub email: Option<String>,
    /// pin 码 (唯一)
    pub pin_code: String,
    /// 0: unused 1: used
    pub status: Option<i32>,
    pub used_time: Option<DateTime>,
    pub create_time: Option<DateTime>,
}

crud!(AppMemberPin {}, "app_member_pin");

impl AppMemberPin {
    pub const TABLE_NAME: &'static str = "app_member_pin";
}
