pub mod app_genealogy_node;
pub mod app_income_history;

pub use app_genealogy_node::AppGenealogyNode;
pub use app_income_history::AppIncomeHistory;
