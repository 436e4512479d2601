use crate::domain::model::{BoardEntity, NewBoard};
use crate::persistence::dao::{BoardColumnDao, BoardDao};
use crate::utils::error::Result;
use crate::utils::validation::validate_positive_id;
use sqlx::sqlite::{SqliteConnection, SqlitePool};

#[derive(Debug, Clone)]
pub struct BoardService {
    pool: SqlitePool,
}

impl BoardService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 建立看板與其所有欄位，全部在同一筆交易中完成
    pub async fn insert(&self, board: NewBoard) -> Result<BoardEntity> {
        board.validate()?;

        tracing::info!("Creating board: {}", board.name);
        let mut tx = self.pool.begin().await?;
        match Self::insert_board(&mut tx, &board).await {
            Ok(entity) => {
                tx.commit().await?;
                tracing::info!("✅ Board created: id {}", entity.id);
                Ok(entity)
            }
            Err(e) => {
                tx.rollback().await?;
                tracing::error!("❌ Failed to create board '{}': {}", board.name, e);
                Err(e)
            }
        }
    }

    async fn insert_board(conn: &mut SqliteConnection, board: &NewBoard) -> Result<BoardEntity> {
        let id = BoardDao::new(conn).insert(&board.name).await?;

        let mut columns = Vec::with_capacity(board.columns.len());
        let mut column_dao = BoardColumnDao::new(conn);
        for (order, column) in (0..).zip(&board.columns) {
            columns.push(column_dao.insert(id, order, column).await?);
        }

        Ok(BoardEntity {
            id,
            name: board.name.clone(),
            columns,
        })
    }

    /// 刪除看板；不存在時回傳 false
    pub async fn delete(&self, id: i64) -> Result<bool> {
        validate_positive_id("board_id", id)?;

        let mut tx = self.pool.begin().await?;
        let mut dao = BoardDao::new(&mut tx);

        tracing::info!("Checking whether board {} exists", id);
        let deleted = match dao.exists(id).await {
            Ok(false) => {
                tracing::warn!("Board {} not found, nothing to delete", id);
                return Ok(false);
            }
            Ok(true) => dao.delete(id).await,
            Err(e) => Err(e),
        };

        match deleted {
            Ok(_) => {
                tx.commit().await?;
                tracing::info!("✅ Board {} deleted", id);
                Ok(true)
            }
            Err(e) => {
                tx.rollback().await?;
                tracing::error!("❌ Failed to delete board {}: {}", id, e);
                Err(e)
            }
        }
    }
}
