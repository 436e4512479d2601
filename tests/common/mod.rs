#![allow(dead_code)]

use sqlx::sqlite::SqlitePool;
use taskboard::domain::dto::BoardColumnInfo;
use taskboard::domain::model::{BoardEntity, NewBoard};
use taskboard::{DatabaseConfig, MigrationRunner, Services};
use tempfile::TempDir;

/// Migrated database in a temporary directory; the directory lives as long as this value
pub struct TestDb {
    pub pool: SqlitePool,
    pub services: Services,
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let pool = Self::connect(&dir).await;
        MigrationRunner::new(pool.clone()).run().await.unwrap();

        Self {
            services: Services::new(pool.clone()),
            pool,
            _dir: dir,
        }
    }

    pub async fn connect(dir: &TempDir) -> SqlitePool {
        let url = format!("sqlite://{}", dir.path().join("taskboard.db").display());
        DatabaseConfig::with_url(url).connect().await.unwrap()
    }

    /// Board with columns To do / Doing / Review / Done / Cancelled
    pub async fn standard_board(&self, name: &str) -> BoardEntity {
        let board = NewBoard::with_standard_layout(
            name,
            "To do",
            vec!["Doing".to_string(), "Review".to_string()],
            "Done",
            "Cancelled",
        );
        self.services.boards.insert(board).await.unwrap()
    }

    pub async fn column_infos(&self, board_id: i64) -> Vec<BoardColumnInfo> {
        self.services
            .board_queries
            .column_infos(board_id)
            .await
            .unwrap()
    }
}
