// 枚举模块

pub mod encashment_status;
pub mod income_source;
pub mod payment_type;
pub mod pin_status;
pub mod position;
pub mod purchase_status;
pub mod role;

pub use encashment_status::EncashmentStatus;
pub use income_source::IncomeSource;
pub use payment_type::PaymentType;
pub use position::Position;
pub use pin_status::PinStatus;

pub use purchase_status::PurchaseStatus;
pub use role::{Actor, Role};
