use rbatis::rbdc::datetime::DateTime;
use rbatis::{crud, impl_select};
use serde::{Deserialize, Serialize};

/// 会员账户表
///
/// 一个会员可持有多个账户, 每个账户对应一个族谱节点 (1:1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMemberAccount {
    pub id: Option<i64>,
    pub member_id: i64,
    /// 账户名 (唯一)
    pub account_name: String,
    /// 推荐人 (介绍人) 账户
    pub sponsor_id: Option<i64>,
    /// 实际安置父账户
    pub under_account_id: Option<i64>,
    /// 人读节点标签, 例如 "L3"
    pub node_label: Option<String>,
    /// 祖先账户 id 列表, 头插, JSON 数组字符串
    pub upper_nodes: Option<String>,
    pub member_type: Option<String>,
    pub package_type: Option<String>,
    pub create_time: Option<DateTime>,
}

crud!(AppMemberAccount {}, "app_member_account");
impl_select!(AppMemberAccount{select_by_id(id: i64) -> Option => "`where id = #{id} LIMIT 1`"});
impl_select!(AppMemberAccount{select_by_account_name(name: &str) -> Option => "`where account_name = #{name} LIMIT 1`"});

impl AppMemberAccount {
    pub const TABLE_NAME: &'static str = "app_member_account";

    /// 解析祖先账户 id 列表 (下标 0 为直接父账户)
    pub fn upper_node_ids(&self) -> Vec<i64> {
        self.upper_nodes
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }

    /// 编码祖先账户 id 列表
    pub fn encode_upper_nodes(ids: &[i64]) -> String {
        serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_nodes_roundtrip() {
        let encoded = AppMemberAccount::encode_upper_nodes(&[5, 3, 1]);
        let account = AppMemberAccount {
            id: Some(9),
            member_id: 1,
            account_name: "acct".to_string(),
            sponsor_id: None,
            under_account_id: Some(5),
            node_label: None,
            upper_nodes: Some(encoded),
            member_type: None,
            package_type: None,
            create_time: None,
        };
        assert_eq!(account.upper_node_ids(), vec![5, 3, 1]);
    }

    #[test]
    fn test_upper_nodes_missing() {
        let account = AppMemberAccount {
            id: None,
            member_id: 1,
            account_name: "root".to_string(),
            sponsor_id: None,
            under_account_id: None,
            node_label: None,
            upper_nodes: None,
            member_type: None,
            package_type: None,
            create_time: None,
        };
        assert!(account.upper_node_ids().is_empty());
    }
}
