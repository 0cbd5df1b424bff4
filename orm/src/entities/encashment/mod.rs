pub mod app_encashment;
pub mod app_sequence_counter;

pub use app_encashment::AppEncashment;
pub use app_sequence_counter::AppSequenceCounter;
