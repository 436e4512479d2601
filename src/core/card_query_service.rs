use crate::domain::dto::CardDetails;
use crate::domain::model::BlockEntity;
use crate::persistence::dao::{BlockDao, CardDao};
use crate::utils::error::{BoardError, Result};
use crate::utils::validation::validate_positive_id;
use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct CardQueryService {
    pool: SqlitePool,
}

impl CardQueryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<CardDetails>> {
        validate_positive_id("card_id", id)?;
        let mut conn = self.pool.acquire().await?;
        CardDao::new(&mut conn).find_details_by_id(id).await
    }

    /// 所有封鎖紀錄，由舊到新
    pub async fn block_history(&self, card_id: i64) -> Result<Vec<BlockEntity>> {
        validate_positive_id("card_id", card_id)?;
        let mut conn = self.pool.acquire().await?;

        if CardDao::new(&mut conn)
            .find_entity_by_id(card_id)
            .await?
            .is_none()
        {
            return Err(BoardError::EntityNotFound {
                entity: "Card",
                id: card_id,
            });
        }
        BlockDao::new(&mut conn).find_by_card_id(card_id).await
    }
}
