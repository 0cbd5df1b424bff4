use rbatis::rbdc::datetime::DateTime;
use rbatis::{crud, impl_select};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 双轨树节点表
///
/// 每个会员账户一个节点, 安置时创建一次, 不移动不删除;
/// (parent_account_id, position) 存储层唯一约束
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppGenealogyNode {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub member_id: i64,
    /// 对应会员账户 (1:1)
    pub member_account_id: i64,
    /// 父账户, 仅树根为空
    pub parent_account_id: Option<i64>,
    /// left / right, 树根为空
    pub position: Option<String>,
    /// 树根为 1, 子节点为父层 + 1
    pub level: i32,
    /// 入树时的配对积分, 随层级衰减, 配对消耗后递减
    pub pair_value: Decimal,
    /// 左区累积待配对积分
    pub left_carry: Decimal,
    /// 右区累积待配对积分
    pub right_carry: Decimal,
    pub create_time: Option<DateTime>,
}

crud!(AppGenealogyNode {}, "app_genealogy_node");
impl_select!(AppGenealogyNode{select_by_account_id(account_id: i64) -> Option => "`where member_account_id = #{account_id} LIMIT 1`"});
impl_select!(AppGenealogyNode{select_children(parent_account_id: i64) => "`where parent_account_id = #{parent_account_id}`"});

impl AppGenealogyNode {
    pub const TABLE_NAME: &'static str = "app_genealogy_node";
}
