use crate::domain::model::BoardEntity;
use crate::utils::error::Result;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;

fn map_board(row: &SqliteRow) -> Result<BoardEntity> {
    Ok(BoardEntity {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        columns: Vec::new(),
    })
}

pub struct BoardDao<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> BoardDao<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&mut self, name: &str) -> Result<i64> {
        let id = sqlx::query("INSERT INTO BOARDS (name) VALUES (?);")
            .bind(name)
            .execute(&mut *self.conn)
            .await?
            .last_insert_rowid();
        tracing::debug!("Board inserted: id {}", id);
        Ok(id)
    }

    pub async fn delete(&mut self, id: i64) -> Result<u64> {
        let rows = sqlx::query("DELETE FROM BOARDS WHERE id = ?;")
            .bind(id)
            .execute(&mut *self.conn)
            .await?
            .rows_affected();
        tracing::debug!("Board {} deleted, rows affected: {}", id, rows);
        Ok(rows)
    }

    /// 只載入看板本身，不含欄位
    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<BoardEntity>> {
        let row = sqlx::query("SELECT id, name FROM BOARDS WHERE id = ? LIMIT 1;")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        match row {
            Some(row) => {
                tracing::debug!("Board found: id {}", id);
                Ok(Some(map_board(&row)?))
            }
            None => {
                tracing::debug!("No board found with id {}", id);
                Ok(None)
            }
        }
    }

    pub async fn exists(&mut self, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM BOARDS WHERE id = ?) AS board_exists;")
            .bind(id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(row.try_get::<i64, _>("board_exists")? != 0)
    }

    pub async fn find_all(&mut self) -> Result<Vec<BoardEntity>> {
        let rows = sqlx::query("SELECT id, name FROM BOARDS ORDER BY id;")
            .fetch_all(&mut *self.conn)
            .await?;

        rows.iter().map(map_board).collect()
    }
}
