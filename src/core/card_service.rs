use crate::domain::dto::{BoardColumnInfo, CardDetails};
use crate::domain::model::{BoardColumnKind, CardEntity, NewCard};
use crate::persistence::dao::{BlockDao, CardDao};
use crate::utils::error::{BoardError, Result};
use crate::utils::validation::{
    validate_max_length, validate_non_empty_string, validate_positive_id, MAX_TEXT_LENGTH,
};
use sqlx::sqlite::{SqliteConnection, SqlitePool};
use sqlx::{Sqlite, Transaction};

#[derive(Debug, Clone)]
pub struct CardService {
    pool: SqlitePool,
}

impl CardService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, card: NewCard) -> Result<CardEntity> {
        card.validate()?;

        tracing::info!("Creating card: {}", card.title);
        let mut tx = self.pool.begin().await?;
        let result = CardDao::new(&mut tx).insert(&card).await;
        let entity = finish(tx, result, "create card").await?;
        tracing::info!("✅ Card created: id {}", entity.id);
        Ok(entity)
    }

    /// 修改標題或描述；未提供的欄位保持不變
    pub async fn update(
        &self,
        card_id: i64,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<CardEntity> {
        validate_positive_id("card_id", card_id)?;
        if let Some(title) = &title {
            validate_non_empty_string("card.title", title)?;
        }
        if let Some(description) = &description {
            validate_max_length("card.description", description, MAX_TEXT_LENGTH)?;
        }

        let mut tx = self.pool.begin().await?;
        let result = Self::update_card(&mut tx, card_id, title, description).await;
        finish(tx, result, "update card").await
    }

    async fn update_card(
        conn: &mut SqliteConnection,
        card_id: i64,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<CardEntity> {
        let mut dao = CardDao::new(conn);
        let mut card = dao
            .find_entity_by_id(card_id)
            .await?
            .ok_or(BoardError::EntityNotFound {
                entity: "Card",
                id: card_id,
            })?;

        if let Some(title) = title {
            card.title = title;
        }
        if let Some(description) = description {
            card.description = description;
        }
        dao.update(&card).await?;
        Ok(card)
    }

    pub async fn move_to_next_column(
        &self,
        card_id: i64,
        board_columns: &[BoardColumnInfo],
    ) -> Result<()> {
        validate_positive_id("card_id", card_id)?;
        if board_columns.is_empty() {
            return Err(BoardError::validation(
                "board_columns",
                "the list of board columns cannot be empty",
            ));
        }

        let mut tx = self.pool.begin().await?;
        let result = Self::move_card(&mut tx, card_id, board_columns).await;
        finish(tx, result, "move card").await
    }

    async fn move_card(
        conn: &mut SqliteConnection,
        card_id: i64,
        board_columns: &[BoardColumnInfo],
    ) -> Result<()> {
        let mut dao = CardDao::new(conn);
        tracing::info!("Looking up card {}", card_id);
        let card = find_movable_card(&mut dao, card_id).await?;

        let current = find_current_column(card.column_id, board_columns)?;
        ensure_not_finished(card_id, current)?;

        let next = find_next_column(current, board_columns)?;
        tracing::info!(
            "Moving card {} from column {} to column {}",
            card_id,
            current.id,
            next.id
        );
        dao.move_to_column(next.id, card_id).await
    }

    pub async fn cancel(
        &self,
        card_id: i64,
        cancel_column_id: i64,
        board_columns: &[BoardColumnInfo],
    ) -> Result<()> {
        validate_positive_id("card_id", card_id)?;
        validate_positive_id("cancel_column_id", cancel_column_id)?;

        let mut tx = self.pool.begin().await?;
        let result = Self::cancel_card(&mut tx, card_id, cancel_column_id, board_columns).await;
        finish(tx, result, "cancel card").await
    }

    async fn cancel_card(
        conn: &mut SqliteConnection,
        card_id: i64,
        cancel_column_id: i64,
        board_columns: &[BoardColumnInfo],
    ) -> Result<()> {
        let mut dao = CardDao::new(conn);
        let card = find_movable_card(&mut dao, card_id).await?;

        let current = find_current_column(card.column_id, board_columns)?;
        ensure_not_finished(card_id, current)?;

        let is_cancel_column = board_columns
            .iter()
            .any(|c| c.id == cancel_column_id && c.kind == BoardColumnKind::Cancel);
        if !is_cancel_column {
            return Err(BoardError::illegal_state(format!(
                "Column {} is not the cancel column of this board",
                cancel_column_id
            )));
        }

        tracing::info!("Cancelling card {} into column {}", card_id, cancel_column_id);
        dao.move_to_column(cancel_column_id, card_id).await
    }

    pub async fn block(
        &self,
        card_id: i64,
        reason: &str,
        board_columns: &[BoardColumnInfo],
    ) -> Result<()> {
        validate_positive_id("card_id", card_id)?;
        validate_non_empty_string("block_reason", reason)?;

        let mut tx = self.pool.begin().await?;
        let result = Self::block_card(&mut tx, card_id, reason, board_columns).await;
        finish(tx, result, "block card").await
    }

    async fn block_card(
        conn: &mut SqliteConnection,
        card_id: i64,
        reason: &str,
        board_columns: &[BoardColumnInfo],
    ) -> Result<()> {
        let card = find_card(&mut CardDao::new(conn), card_id).await?;
        if card.blocked {
            tracing::warn!("Card {} is already blocked", card_id);
            return Err(BoardError::CardBlocked {
                message: format!("Card {} is already blocked", card_id),
            });
        }

        let current = find_current_column(card.column_id, board_columns)?;
        if current.kind.is_terminal() {
            return Err(BoardError::illegal_state(format!(
                "Card {} is in a {} column and cannot be blocked",
                card_id, current.kind
            )));
        }

        BlockDao::new(conn).block(reason, card_id).await?;
        tracing::info!("🔒 Card {} blocked", card_id);
        Ok(())
    }

    pub async fn unblock(&self, card_id: i64, reason: &str) -> Result<()> {
        validate_positive_id("card_id", card_id)?;
        validate_non_empty_string("unblock_reason", reason)?;

        let mut tx = self.pool.begin().await?;
        let result = Self::unblock_card(&mut tx, card_id, reason).await;
        finish(tx, result, "unblock card").await
    }

    async fn unblock_card(conn: &mut SqliteConnection, card_id: i64, reason: &str) -> Result<()> {
        let card = find_card(&mut CardDao::new(conn), card_id).await?;
        if !card.blocked {
            tracing::warn!("Card {} is not blocked", card_id);
            return Err(BoardError::CardBlocked {
                message: format!("Card {} is not blocked", card_id),
            });
        }

        BlockDao::new(conn).unblock(reason, card_id).await?;
        tracing::info!("🔓 Card {} unblocked", card_id);
        Ok(())
    }
}

/// 成功時提交交易，失敗時回滾並記錄錯誤
async fn finish<T>(
    tx: Transaction<'static, Sqlite>,
    result: Result<T>,
    operation: &str,
) -> Result<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            tx.rollback().await?;
            match e.severity() {
                crate::utils::error::ErrorSeverity::Critical => {
                    tracing::error!("❌ Failed to {}: {}", operation, e)
                }
                _ => tracing::warn!("Rejected {}: {}", operation, e),
            }
            Err(e)
        }
    }
}

async fn find_card(dao: &mut CardDao<'_>, card_id: i64) -> Result<CardDetails> {
    dao.find_details_by_id(card_id).await?.ok_or_else(|| {
        tracing::warn!("Card {} not found", card_id);
        BoardError::EntityNotFound {
            entity: "Card",
            id: card_id,
        }
    })
}

async fn find_movable_card(dao: &mut CardDao<'_>, card_id: i64) -> Result<CardDetails> {
    let card = find_card(dao, card_id).await?;
    if card.blocked {
        tracing::warn!("Attempt to move blocked card {}", card_id);
        return Err(BoardError::CardBlocked {
            message: format!("Card {} is blocked, unblock it before moving", card_id),
        });
    }
    Ok(card)
}

fn find_current_column(
    column_id: i64,
    board_columns: &[BoardColumnInfo],
) -> Result<&BoardColumnInfo> {
    board_columns
        .iter()
        .find(|c| c.id == column_id)
        .ok_or_else(|| {
            tracing::error!("Column {} is not part of the selected board", column_id);
            BoardError::illegal_state("The card belongs to another board")
        })
}

fn ensure_not_finished(card_id: i64, current: &BoardColumnInfo) -> Result<()> {
    if current.kind.is_terminal() {
        tracing::warn!("Card {} is already in a {} column", card_id, current.kind);
        return Err(BoardError::CardFinished { card_id });
    }
    Ok(())
}

fn find_next_column<'a>(
    current: &BoardColumnInfo,
    board_columns: &'a [BoardColumnInfo],
) -> Result<&'a BoardColumnInfo> {
    board_columns
        .iter()
        .find(|c| c.order == current.order + 1)
        .ok_or_else(|| {
            tracing::error!("No column found after order {}", current.order);
            BoardError::illegal_state("There is no next column available")
        })
}
