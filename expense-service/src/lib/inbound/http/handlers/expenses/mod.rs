pub mod create_expense;
pub mod delete_expense;
pub mod list_expenses;
pub mod update_expense;

pub use create_expense::create_expense;
pub use delete_expense::delete_expense;
pub use list_expenses::list_expenses;
pub use update_expense::update_expense;
