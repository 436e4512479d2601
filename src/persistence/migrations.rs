//! Versioned schema migrations.
//!
//! Changesets are embedded in the binary and recorded in the `schema_migrations`
//! ledger together with a SHA-256 checksum of their SQL. An applied changeset
//! whose SQL changed afterwards is reported instead of silently re-run.

use crate::utils::error::{BoardError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::collections::HashMap;

const MIGRATIONS_TABLE: &str = "schema_migrations";

/// A single embedded changeset
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub id: &'static str,
    pub description: &'static str,
    pub sql: &'static str,
}

impl Migration {
    pub fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.sql.as_bytes()))
    }
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        id: "202410101900",
        description: "create boards table",
        sql: include_str!("../../migrations/202410101900_create_boards_table.sql"),
    },
    Migration {
        id: "202410101901",
        description: "create boards columns table",
        sql: include_str!("../../migrations/202410101901_create_boards_columns_table.sql"),
    },
    Migration {
        id: "202410101902",
        description: "create cards table",
        sql: include_str!("../../migrations/202410101902_create_cards_table.sql"),
    },
    Migration {
        id: "202410101903",
        description: "create blocks table",
        sql: include_str!("../../migrations/202410101903_create_blocks_table.sql"),
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub applied: Vec<String>,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub id: String,
    pub description: String,
    pub applied_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct AppliedMigration {
    checksum: String,
    applied_at: DateTime<Utc>,
}

pub struct MigrationRunner {
    pool: SqlitePool,
    migrations: &'static [Migration],
}

impl MigrationRunner {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_migrations(pool, MIGRATIONS)
    }

    pub fn with_migrations(pool: SqlitePool, migrations: &'static [Migration]) -> Self {
        Self { pool, migrations }
    }

    /// Applies every pending changeset in order
    pub async fn run(&self) -> Result<MigrationReport> {
        self.ensure_migrations_table().await?;
        let applied = self.applied_migrations().await?;
        self.verify_checksums(&applied)?;

        let mut report = MigrationReport {
            applied: Vec::new(),
            skipped: 0,
        };

        for migration in self.migrations {
            if applied.contains_key(migration.id) {
                report.skipped += 1;
                continue;
            }

            tracing::info!(
                "🛠️ Applying migration {} - {}",
                migration.id,
                migration.description
            );
            self.apply(migration).await?;
            report.applied.push(migration.id.to_string());
        }

        if report.applied.is_empty() {
            tracing::debug!("Database schema is up to date");
        } else {
            tracing::info!("✅ Applied {} migration(s)", report.applied.len());
        }
        Ok(report)
    }

    pub async fn status(&self) -> Result<Vec<MigrationStatus>> {
        self.ensure_migrations_table().await?;
        let applied = self.applied_migrations().await?;

        Ok(self
            .migrations
            .iter()
            .map(|m| MigrationStatus {
                id: m.id.to_string(),
                description: m.description.to_string(),
                applied_at: applied.get(m.id).map(|a| a.applied_at),
            })
            .collect())
    }

    async fn apply(&self, migration: &Migration) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::raw_sql(migration.sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| BoardError::MigrationError {
                id: migration.id.to_string(),
                message: e.to_string(),
            })?;

        sqlx::query(&format!(
            "INSERT INTO {} (id, description, checksum, applied_at) VALUES (?, ?, ?, ?);",
            MIGRATIONS_TABLE
        ))
        .bind(migration.id)
        .bind(migration.description)
        .bind(migration.checksum())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    fn verify_checksums(&self, applied: &HashMap<String, AppliedMigration>) -> Result<()> {
        for migration in self.migrations {
            if let Some(record) = applied.get(migration.id) {
                if record.checksum != migration.checksum() {
                    tracing::error!(
                        "Checksum mismatch for migration {}: recorded {}, embedded {}",
                        migration.id,
                        record.checksum,
                        migration.checksum()
                    );
                    return Err(BoardError::MigrationError {
                        id: migration.id.to_string(),
                        message: "checksum of the applied changeset has changed".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    async fn ensure_migrations_table(&self) -> Result<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id VARCHAR(255) PRIMARY KEY,
                description VARCHAR(255) NOT NULL,
                checksum VARCHAR(64) NOT NULL,
                applied_at TIMESTAMP NOT NULL
            );",
            MIGRATIONS_TABLE
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn applied_migrations(&self) -> Result<HashMap<String, AppliedMigration>> {
        let sql = format!(
            "SELECT id, checksum, applied_at FROM {} ORDER BY id;",
            MIGRATIONS_TABLE
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut applied: HashMap<String, AppliedMigration> = HashMap::with_capacity(rows.len());
        for row in rows {
            applied.insert(
                row.try_get("id")?,
                AppliedMigration {
                    checksum: row.try_get("checksum")?,
                    applied_at: row.try_get("applied_at")?,
                },
            );
        }
        Ok(applied)
    }
}
