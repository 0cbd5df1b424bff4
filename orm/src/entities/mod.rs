pub mod config;
pub mod encashment;
pub mod genealogy;
pub mod member;
pub mod purchase;

// Re-export all entities
pub use config::*;
pub use encashment::*;
pub use genealogy::*;
pub use member::*;
pub use purchase::*;
