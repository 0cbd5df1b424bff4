use std::sync::Arc;

use common::error::{AppError, AppResult};
use orm::entities::{AppGenealogyNode, AppMemberAccount};
use rbatis::RBatis;

/// 族谱只读查询服务 (报表/组织图)
#[derive(Clone)]
pub struct GenealogyService {
    rb: Arc<RBatis>,
}

impl GenealogyService {
    pub fn new(rb: Arc<RBatis>) -> Self {
        Self { rb }
    }

    /// 某账户的直接下级节点 (至多左右各一)
    pub async fn direct_downlines(&self, account_id: i64) -> AppResult<Vec<AppGenealogyNode>> {
        AppGenealogyNode::select_by_account_id(self.rb.as_ref(), account_id)
            .await?
            .ok_or_else(|| AppError::not_found("error.account_not_placed"))?;
        Ok(AppGenealogyNode::select_children(self.rb.as_ref(), account_id).await?)
    }

    /// 某账户的祖先账户链, 下标 0 为直接父账户
    pub async fn upline_of(&self, account_id: i64) -> AppResult<Vec<AppMemberAccount>> {
        let account = AppMemberAccount::select_by_id(self.rb.as_ref(), account_id)
            .await?
            .ok_or_else(|| AppError::not_found("error.account_not_found"))?;

        let mut upline = Vec::new();
        for ancestor_id in account.upper_node_ids() {
            if let Some(ancestor) =
                AppMemberAccount::select_by_id(self.rb.as_ref(), ancestor_id).await?
            {
                upline.push(ancestor);
            }
        }
        Ok(upline)
    }
}
