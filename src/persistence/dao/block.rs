use crate::domain::model::BlockEntity;
use crate::utils::error::Result;
use chrono::Utc;
use sqlx::sqlite::SqliteConnection;
use sqlx::Row;

pub struct BlockDao<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> BlockDao<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn block(&mut self, reason: &str, card_id: i64) -> Result<i64> {
        let id = sqlx::query(
            "INSERT INTO BLOCKS (blocked_at, block_reason, card_id) VALUES (?, ?, ?);",
        )
        .bind(Utc::now())
        .bind(reason)
        .bind(card_id)
        .execute(&mut *self.conn)
        .await?
        .last_insert_rowid();
        Ok(id)
    }

    /// 關閉卡片目前的封鎖，回傳受影響筆數
    pub async fn unblock(&mut self, reason: &str, card_id: i64) -> Result<u64> {
        let rows = sqlx::query(
            "UPDATE BLOCKS SET unblocked_at = ?, unblock_reason = ? WHERE card_id = ? AND unblocked_at IS NULL;",
        )
        .bind(Utc::now())
        .bind(reason)
        .bind(card_id)
        .execute(&mut *self.conn)
        .await?
        .rows_affected();
        Ok(rows)
    }

    pub async fn find_by_card_id(&mut self, card_id: i64) -> Result<Vec<BlockEntity>> {
        let rows = sqlx::query(
            "SELECT id, blocked_at, block_reason, unblocked_at, unblock_reason, card_id
               FROM BLOCKS
              WHERE card_id = ?
              ORDER BY id;",
        )
        .bind(card_id)
        .fetch_all(&mut *self.conn)
        .await?;

        rows.iter()
            .map(|row| -> Result<BlockEntity> {
                Ok(BlockEntity {
                    id: row.try_get("id")?,
                    blocked_at: row.try_get("blocked_at")?,
                    block_reason: row.try_get("block_reason")?,
                    unblocked_at: row.try_get("unblocked_at")?,
                    unblock_reason: row.try_get("unblock_reason")?,
                    card_id: row.try_get("card_id")?,
                })
            })
            .collect()
    }
}
