use crate::domain::dto::{BoardColumnInfo, BoardColumnSummary};
use crate::domain::model::{BoardColumnEntity, BoardColumnKind, NewBoardColumn};
use crate::utils::error::Result;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;

fn map_kind(row: &SqliteRow) -> Result<BoardColumnKind> {
    row.try_get::<String, _>("kind")?.parse()
}

fn map_column(row: &SqliteRow) -> Result<BoardColumnEntity> {
    Ok(BoardColumnEntity {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        order: row.try_get("order")?,
        kind: map_kind(row)?,
        board_id: row.try_get("board_id")?,
    })
}

pub struct BoardColumnDao<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> BoardColumnDao<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(
        &mut self,
        board_id: i64,
        order: i32,
        column: &NewBoardColumn,
    ) -> Result<BoardColumnEntity> {
        let id = sqlx::query(
            r#"INSERT INTO BOARDS_COLUMNS (name, "order", kind, board_id) VALUES (?, ?, ?, ?);"#,
        )
        .bind(&column.name)
        .bind(order)
        .bind(column.kind.as_str())
        .bind(board_id)
        .execute(&mut *self.conn)
        .await?
        .last_insert_rowid();

        Ok(BoardColumnEntity {
            id,
            name: column.name.clone(),
            order,
            kind: column.kind,
            board_id,
        })
    }

    pub async fn find_by_board_id(&mut self, board_id: i64) -> Result<Vec<BoardColumnEntity>> {
        let rows = sqlx::query(
            r#"SELECT id, name, "order", kind, board_id
                 FROM BOARDS_COLUMNS
                WHERE board_id = ?
                ORDER BY "order";"#,
        )
        .bind(board_id)
        .fetch_all(&mut *self.conn)
        .await?;

        rows.iter().map(map_column).collect()
    }

    pub async fn find_info_by_board_id(&mut self, board_id: i64) -> Result<Vec<BoardColumnInfo>> {
        let rows = sqlx::query(
            r#"SELECT id, "order", kind FROM BOARDS_COLUMNS WHERE board_id = ? ORDER BY "order";"#,
        )
        .bind(board_id)
        .fetch_all(&mut *self.conn)
        .await?;

        rows.iter()
            .map(|row| -> Result<BoardColumnInfo> {
                Ok(BoardColumnInfo {
                    id: row.try_get("id")?,
                    order: row.try_get("order")?,
                    kind: map_kind(row)?,
                })
            })
            .collect()
    }

    pub async fn find_summaries_by_board_id(
        &mut self,
        board_id: i64,
    ) -> Result<Vec<BoardColumnSummary>> {
        let rows = sqlx::query(
            r#"SELECT bc.id,
                      bc.name,
                      bc.kind,
                      (SELECT COUNT(c.id) FROM CARDS c WHERE c.board_column_id = bc.id) AS cards_amount
                 FROM BOARDS_COLUMNS bc
                WHERE bc.board_id = ?
                ORDER BY bc."order";"#,
        )
        .bind(board_id)
        .fetch_all(&mut *self.conn)
        .await?;

        rows.iter()
            .map(|row| -> Result<BoardColumnSummary> {
                Ok(BoardColumnSummary {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    kind: map_kind(row)?,
                    cards_amount: row.try_get("cards_amount")?,
                })
            })
            .collect()
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<BoardColumnEntity>> {
        let row = sqlx::query(
            r#"SELECT id, name, "order", kind, board_id FROM BOARDS_COLUMNS WHERE id = ?;"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        row.as_ref().map(map_column).transpose()
    }
}
