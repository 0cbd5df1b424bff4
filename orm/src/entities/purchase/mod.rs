pub mod app_commission;
pub mod app_purchase;
pub mod app_purchase_item;

pub use app_commission::AppCommission;
pub use app_purchase::AppPurchase;
pub use app_purchase_item::AppPurchaseItem;
