// 领域服务模块

pub mod balance_service;
pub mod compensation_service;
pub mod encashment_service;
pub mod genealogy_service;
pub mod pairing_service;
pub mod pin_service;
pub mod placement_service;
pub mod purchase_service;
pub mod unilevel_service;

pub use balance_service::BalanceService;
pub use compensation_service::CompensationService;
pub use encashment_service::EncashmentService;
pub use genealogy_service::GenealogyService;
pub use pairing_service::PairingService;
pub use pin_service::PinService;
pub use placement_service::PlacementService;
pub use purchase_service::PurchaseService;
pub use unilevel_service::UnilevelService;
