pub mod dao;
pub mod migrations;

pub use migrations::{MigrationReport, MigrationRunner, MigrationStatus};
