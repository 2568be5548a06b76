pub mod auth;
pub mod expense;
