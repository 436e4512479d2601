use crate::domain::dto::{BoardColumnInfo, BoardDetails};
use crate::domain::model::BoardEntity;
use crate::persistence::dao::{BoardColumnDao, BoardDao};
use crate::utils::error::Result;
use crate::utils::validation::validate_positive_id;
use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct BoardQueryService {
    pool: SqlitePool,
}

impl BoardQueryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 看板及其依順序排列的欄位
    pub async fn find_by_id(&self, id: i64) -> Result<Option<BoardEntity>> {
        validate_positive_id("board_id", id)?;
        let mut conn = self.pool.acquire().await?;

        let Some(mut board) = BoardDao::new(&mut conn).find_by_id(id).await? else {
            return Ok(None);
        };
        board.columns = BoardColumnDao::new(&mut conn).find_by_board_id(id).await?;
        Ok(Some(board))
    }

    pub async fn show_board_details(&self, id: i64) -> Result<Option<BoardDetails>> {
        validate_positive_id("board_id", id)?;
        let mut conn = self.pool.acquire().await?;

        let Some(board) = BoardDao::new(&mut conn).find_by_id(id).await? else {
            return Ok(None);
        };
        let columns = BoardColumnDao::new(&mut conn)
            .find_summaries_by_board_id(id)
            .await?;

        Ok(Some(BoardDetails {
            id: board.id,
            name: board.name,
            columns,
        }))
    }

    pub async fn list(&self) -> Result<Vec<BoardEntity>> {
        let mut conn = self.pool.acquire().await?;
        BoardDao::new(&mut conn).find_all().await
    }

    /// 卡片服務用來判斷移動規則的欄位資訊
    pub async fn column_infos(&self, board_id: i64) -> Result<Vec<BoardColumnInfo>> {
        validate_positive_id("board_id", board_id)?;
        let mut conn = self.pool.acquire().await?;
        BoardColumnDao::new(&mut conn)
            .find_info_by_board_id(board_id)
            .await
    }
}
