use serde::{Deserialize, Serialize};

/// 安置请求: 消费 pin, 将预注册会员安置进双轨树
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementReq {
    /// 推荐人账户 (安置起点, 从该账户的节点往下广度优先找空位)
    pub sponsor_account_id: i64,
    /// 待消费的 pin
    pub pin_id: i64,
    /// 新账户名 (唯一)
    pub account_name: String,
    /// 是否老会员开的扩展账户
    #[serde(default)]
    pub is_extension: bool,
}
