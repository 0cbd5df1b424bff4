pub mod app_member;
pub mod app_member_account;
pub mod app_member_pin;

pub use app_member::AppMember;
pub use app_member_account::AppMemberAccount;
pub use app_member_pin::AppMemberPin;
