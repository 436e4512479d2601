use crate::domain::dto::BoardColumnDetails;
use crate::persistence::dao::{BoardColumnDao, CardDao};
use crate::utils::error::Result;
use crate::utils::validation::validate_positive_id;
use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct BoardColumnQueryService {
    pool: SqlitePool,
}

impl BoardColumnQueryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<BoardColumnDetails>> {
        validate_positive_id("column_id", id)?;
        let mut conn = self.pool.acquire().await?;

        let Some(column) = BoardColumnDao::new(&mut conn).find_by_id(id).await? else {
            return Ok(None);
        };
        let cards = CardDao::new(&mut conn).find_by_column_id(id).await?;

        Ok(Some(BoardColumnDetails {
            id: column.id,
            name: column.name,
            kind: column.kind,
            order: column.order,
            board_id: column.board_id,
            cards,
        }))
    }
}
