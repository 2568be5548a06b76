pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::expense;
pub use outbound::repositories;

/// Embedded migrations, shared by the server binary and the test suites.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
