#[cfg(feature = "cli")]
pub mod cli;
pub mod database;
pub mod toml_config;

pub use database::DatabaseConfig;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::{error::Result, validation::Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "taskboard")]
#[command(about = "Manage Kanban boards stored in SQLite")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "taskboard.toml")]
    pub config: String,

    /// Database URL, overrides the configuration file
    #[arg(long, global = true, env = "DB_URL")]
    pub database_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: cli::Command,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入配置檔並套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = TomlConfig::from_optional_file(&self.config)?;
        config.apply_overrides(self.database_url.as_deref());
        config.validate()?;
        Ok(config)
    }
}

impl TomlConfig {
    pub fn apply_overrides(&mut self, database_url: Option<&str>) {
        if let Some(url) = database_url {
            tracing::debug!("Database URL overridden to: {}", url);
            self.database.url = url.to_string();
        }
    }
}
