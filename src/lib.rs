#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod persistence;
pub mod utils;

#[cfg(feature = "cli")]
pub use app::{CommandOutput, CommandRunner};
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{DatabaseConfig, TomlConfig};
pub use crate::core::Services;
pub use persistence::MigrationRunner;
pub use utils::error::{BoardError, Result};
