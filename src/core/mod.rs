pub mod board_column_query_service;
pub mod board_query_service;
pub mod board_service;
pub mod card_query_service;
pub mod card_service;

pub use board_column_query_service::BoardColumnQueryService;
pub use board_query_service::BoardQueryService;
pub use board_service::BoardService;
pub use card_query_service::CardQueryService;
pub use card_service::CardService;

pub use crate::utils::error::Result;

use sqlx::sqlite::SqlitePool;

/// All services sharing one connection pool
#[derive(Debug, Clone)]
pub struct Services {
    pub boards: BoardService,
    pub board_queries: BoardQueryService,
    pub column_queries: BoardColumnQueryService,
    pub cards: CardService,
    pub card_queries: CardQueryService,
}

impl Services {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            boards: BoardService::new(pool.clone()),
            board_queries: BoardQueryService::new(pool.clone()),
            column_queries: BoardColumnQueryService::new(pool.clone()),
            cards: CardService::new(pool.clone()),
            card_queries: CardQueryService::new(pool),
        }
    }
}
