//! Expense domain entities.

pub mod category;
pub mod model;
pub mod status;

pub use category::ExpenseCategory;
pub use model::{CreateExpense, Expense, UpdateExpense};
pub use status::ExpenseStatus;
