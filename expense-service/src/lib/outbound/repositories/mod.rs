pub mod expense;
pub mod session;
pub mod user;

pub use expense::SqliteExpenseRepository;
pub use session::SqliteSessionRepository;
pub use user::SqliteUserRepository;
