use serde::{Deserialize, Serialize};

/// 安置结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementResult {
    pub genealogy_node_id: i64,
    pub account_id: i64,
    /// left / right
    pub position: String,
    pub level: i32,
}
