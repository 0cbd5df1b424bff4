// 响应结构

pub mod bulk_result;
pub mod placement_result;

pub use bulk_result::{BulkItemResult, BulkOpResult};
pub use placement_result::PlacementResult;
