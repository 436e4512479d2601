use crate::domain::dto::{CardDetails, CardSummary};
use crate::domain::model::{CardEntity, NewCard};
use crate::utils::error::Result;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;

fn map_card(row: &SqliteRow) -> Result<CardEntity> {
    Ok(CardEntity {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        board_column_id: row.try_get("board_column_id")?,
    })
}

pub struct CardDao<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CardDao<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&mut self, card: &NewCard) -> Result<CardEntity> {
        let id = sqlx::query(
            "INSERT INTO CARDS (title, description, board_column_id) VALUES (?, ?, ?);",
        )
        .bind(&card.title)
        .bind(&card.description)
        .bind(card.board_column_id)
        .execute(&mut *self.conn)
        .await?
        .last_insert_rowid();

        Ok(CardEntity {
            id,
            title: card.title.clone(),
            description: card.description.clone(),
            board_column_id: card.board_column_id,
        })
    }

    pub async fn find_entity_by_id(&mut self, id: i64) -> Result<Option<CardEntity>> {
        let row = sqlx::query(
            "SELECT id, title, description, board_column_id FROM CARDS WHERE id = ?;",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        row.as_ref().map(map_card).transpose()
    }

    pub async fn update(&mut self, card: &CardEntity) -> Result<()> {
        sqlx::query("UPDATE CARDS SET title = ?, description = ? WHERE id = ?;")
            .bind(&card.title)
            .bind(&card.description)
            .bind(card.id)
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }

    /// 卡片詳細資料，含目前未解除的封鎖與歷史封鎖次數
    pub async fn find_details_by_id(&mut self, id: i64) -> Result<Option<CardDetails>> {
        let row = sqlx::query(
            r#"SELECT c.id,
                      c.title,
                      c.description,
                      b.blocked_at,
                      b.block_reason,
                      c.board_column_id,
                      bc.name AS column_name,
                      (SELECT COUNT(sub_b.id) FROM BLOCKS sub_b WHERE sub_b.card_id = c.id) AS blocks_amount
                 FROM CARDS c
                 LEFT JOIN BLOCKS b
                   ON c.id = b.card_id
                  AND b.unblocked_at IS NULL
                INNER JOIN BOARDS_COLUMNS bc
                   ON bc.id = c.board_column_id
                WHERE c.id = ?;"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let blocked_at: Option<chrono::DateTime<chrono::Utc>> = row.try_get("blocked_at")?;
        Ok(Some(CardDetails {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            blocked: blocked_at.is_some(),
            blocked_at,
            block_reason: row.try_get("block_reason")?,
            blocks_amount: row.try_get("blocks_amount")?,
            column_id: row.try_get("board_column_id")?,
            column_name: row.try_get("column_name")?,
        }))
    }

    pub async fn find_by_column_id(&mut self, column_id: i64) -> Result<Vec<CardSummary>> {
        let rows = sqlx::query(
            r#"SELECT c.id,
                      c.title,
                      c.description,
                      EXISTS(SELECT 1 FROM BLOCKS b WHERE b.card_id = c.id AND b.unblocked_at IS NULL) AS blocked,
                      (SELECT COUNT(sub_b.id) FROM BLOCKS sub_b WHERE sub_b.card_id = c.id) AS blocks_amount
                 FROM CARDS c
                WHERE c.board_column_id = ?
                ORDER BY c.id;"#,
        )
        .bind(column_id)
        .fetch_all(&mut *self.conn)
        .await?;

        rows.iter()
            .map(|row| -> Result<CardSummary> {
                Ok(CardSummary {
                    id: row.try_get("id")?,
                    title: row.try_get("title")?,
                    description: row.try_get("description")?,
                    blocked: row.try_get::<i64, _>("blocked")? != 0,
                    blocks_amount: row.try_get("blocks_amount")?,
                })
            })
            .collect()
    }

    pub async fn move_to_column(&mut self, column_id: i64, card_id: i64) -> Result<()> {
        sqlx::query("UPDATE CARDS SET board_column_id = ? WHERE id = ?;")
            .bind(column_id)
            .bind(card_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }
}
