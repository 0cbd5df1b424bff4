use serde::{Deserialize, Serialize};

/// 发放注册 pin 请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuePinReq {
    /// 预注册会员信息 id
    pub member_id: i64,
    /// pin 发送目标邮箱
    pub email: String,
    /// 购买 pin 的付款方式
    pub payment_method: String,
    /// 归属的推荐人账户 (可为空, 安置时回填)
    pub sponsor_account_id: Option<i64>,
}
