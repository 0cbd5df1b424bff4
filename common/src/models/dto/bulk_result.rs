use serde::{Deserialize, Serialize};

/// 批量操作单项结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkItemResult {
    pub id: i64,
    pub success: bool,
    /// 失败时的机器可读原因
    pub reason: Option<String>,
}

/// 批量操作汇总结果 (逐单独立处理, 单笔失败不影响其他)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOpResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<BulkItemResult>,
}

impl BulkOpResult {
    pub fn from_items(items: Vec<BulkItemResult>) -> Self {
        let total = items.len();
        let succeeded = items.iter().filter(|i| i.success).count();
        Self {
            total,
            succeeded,
            failed: total - succeeded,
            items,
        }
    }
}
