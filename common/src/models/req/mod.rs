// 请求结构

pub mod compensation_req;
pub mod encashment_req;
pub mod pin_req;
pub mod placement_req;
pub mod purchase_req;

pub use compensation_req::SetCompensationReq;
pub use encashment_req::{
    CreateEncashmentReq, ProcessEncashmentReq, RejectEncashmentReq, ReleaseEncashmentReq,
};
pub use pin_req::IssuePinReq;
pub use placement_req::PlacementReq;
pub use purchase_req::{
    BulkPurchaseReq, CreatePurchaseReq, MarkPaidReq, PurchaseItemReq, ReleasePurchaseReq,
};
