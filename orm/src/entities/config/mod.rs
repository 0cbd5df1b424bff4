pub mod app_compensation_setting;

pub use app_compensation_setting::AppCompensationSetting;
