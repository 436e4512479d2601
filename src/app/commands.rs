use crate::app::output::CommandOutput;
use crate::config::cli::{BoardCommand, CardCommand, ColumnCommand, Command};
use crate::core::Services;
use crate::domain::dto::BoardColumnInfo;
use crate::domain::model::{BoardColumnKind, NewBoard, NewCard};
use crate::persistence::MigrationRunner;
use crate::utils::error::{BoardError, Result};
use sqlx::sqlite::SqlitePool;

pub struct CommandRunner {
    pool: SqlitePool,
    services: Services,
}

impl CommandRunner {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            services: Services::new(pool.clone()),
            pool,
        }
    }

    pub async fn run(&self, command: Command) -> Result<CommandOutput> {
        match command {
            Command::Migrate { status } => {
                let runner = MigrationRunner::new(self.pool.clone());
                if status {
                    Ok(CommandOutput::MigrationStatus(runner.status().await?))
                } else {
                    Ok(CommandOutput::Migrations(runner.run().await?))
                }
            }
            Command::Board(command) => self.run_board(command).await,
            Command::Column(ColumnCommand::Show { id }) => self
                .services
                .column_queries
                .find_by_id(id)
                .await?
                .map(CommandOutput::Column)
                .ok_or(BoardError::EntityNotFound {
                    entity: "Column",
                    id,
                }),
            Command::Card(command) => self.run_card(command).await,
        }
    }

    async fn run_board(&self, command: BoardCommand) -> Result<CommandOutput> {
        match command {
            BoardCommand::Create(args) => {
                let board = NewBoard::with_standard_layout(
                    args.name,
                    args.initial,
                    args.pending,
                    args.final_column,
                    args.cancel,
                );
                Ok(CommandOutput::Board(self.services.boards.insert(board).await?))
            }
            BoardCommand::List => Ok(CommandOutput::Boards(
                self.services.board_queries.list().await?,
            )),
            BoardCommand::Show { id } => self
                .services
                .board_queries
                .show_board_details(id)
                .await?
                .map(CommandOutput::BoardDetails)
                .ok_or(BoardError::EntityNotFound { entity: "Board", id }),
            BoardCommand::Delete { id } => {
                let deleted = self.services.boards.delete(id).await?;
                Ok(CommandOutput::BoardDeleted { id, deleted })
            }
        }
    }

    async fn run_card(&self, command: CardCommand) -> Result<CommandOutput> {
        let cards = &self.services.cards;
        match command {
            CardCommand::Create {
                board,
                title,
                description,
            } => {
                let columns = self.board_columns(board).await?;
                let initial = column_of_kind(&columns, BoardColumnKind::Initial, board)?;
                let card = cards
                    .create(NewCard {
                        title,
                        description,
                        board_column_id: initial.id,
                    })
                    .await?;
                Ok(CommandOutput::Card(card))
            }
            CardCommand::Show { id } => self
                .services
                .card_queries
                .find_by_id(id)
                .await?
                .map(CommandOutput::CardDetails)
                .ok_or(BoardError::EntityNotFound { entity: "Card", id }),
            CardCommand::Blocks { id } => {
                let blocks = self.services.card_queries.block_history(id).await?;
                Ok(CommandOutput::Blocks { card_id: id, blocks })
            }
            CardCommand::Edit {
                id,
                title,
                description,
            } => Ok(CommandOutput::Card(
                cards.update(id, title, description).await?,
            )),
            CardCommand::Move { board, id } => {
                let columns = self.board_columns(board).await?;
                cards.move_to_next_column(id, &columns).await?;
                Ok(CommandOutput::message(format!("➡️ Card {} moved", id)))
            }
            CardCommand::Cancel { board, id } => {
                let columns = self.board_columns(board).await?;
                let cancel = column_of_kind(&columns, BoardColumnKind::Cancel, board)?;
                cards.cancel(id, cancel.id, &columns).await?;
                Ok(CommandOutput::message(format!("❎ Card {} cancelled", id)))
            }
            CardCommand::Block { board, id, reason } => {
                let columns = self.board_columns(board).await?;
                cards.block(id, &reason, &columns).await?;
                Ok(CommandOutput::message(format!("🔒 Card {} blocked", id)))
            }
            CardCommand::Unblock { id, reason } => {
                cards.unblock(id, &reason).await?;
                Ok(CommandOutput::message(format!("🔓 Card {} unblocked", id)))
            }
        }
    }

    /// 看板不存在時欄位清單為空
    async fn board_columns(&self, board_id: i64) -> Result<Vec<BoardColumnInfo>> {
        let columns = self.services.board_queries.column_infos(board_id).await?;
        if columns.is_empty() {
            return Err(BoardError::EntityNotFound {
                entity: "Board",
                id: board_id,
            });
        }
        Ok(columns)
    }
}

fn column_of_kind(
    columns: &[BoardColumnInfo],
    kind: BoardColumnKind,
    board_id: i64,
) -> Result<BoardColumnInfo> {
    columns
        .iter()
        .find(|c| c.kind == kind)
        .copied()
        .ok_or_else(|| {
            BoardError::illegal_state(format!("Board {} has no {} column", board_id, kind))
        })
}
