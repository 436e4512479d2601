use crate::utils::error::{BoardError, Result};
use crate::utils::validation::{validate_database_url, validate_range, Validate};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://taskboard.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub create_if_missing: bool,
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            acquire_timeout_seconds: 30,
            create_if_missing: true,
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// 建立連線池；所有寫入都透過明確的交易提交
    pub async fn connect(&self) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(self.create_if_missing)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_seconds));

        // 記憶體資料庫只存在於單一連線中，必須保留該連線
        if self.is_in_memory() {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        } else {
            pool_options = pool_options.max_connections(self.max_connections);
        }

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            tracing::error!("Failed to open database {}: {}", self.url, e);
            e
        })?;

        tracing::debug!(
            "Database pool ready: url={}, max_connections={}",
            self.url,
            pool.options().get_max_connections()
        );
        Ok(pool)
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(BoardError::MissingConfigError {
                field: "database.url".to_string(),
            });
        }
        validate_database_url("database.url", &self.url)?;
        validate_range("database.max_connections", self.max_connections, 1, 100)?;
        validate_range(
            "database.acquire_timeout_seconds",
            self.acquire_timeout_seconds,
            1,
            3600,
        )?;
        Ok(())
    }
}
