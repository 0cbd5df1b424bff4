use rbatis::rbdc::datetime::DateTime;
use rbatis::{crud, impl_select};
use serde::{Deserialize, Serialize};

/// 预注册会员信息表
///
/// 注册时创建, 安置进树后 status 置为 active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMember {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    /// 0: 未激活 1: 已激活
    pub status: Option<i32>,
    pub create_time: Option<DateTime>,
}

crud!(AppMember {}, "app_member");
impl_select!(AppMember{select_by_id(id: i64) -> Option => "`where id = #{id} LIMIT 1`"});

impl AppMember {
    pub const TABLE_NAME: &'static str = "app_member";

    pub const STATUS_INACTIVE: i32 = 0;
    pub const STATUS_ACTIVE: i32 = 1;
}
