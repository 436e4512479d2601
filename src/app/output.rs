use crate::domain::dto::{BoardColumnDetails, BoardDetails, CardDetails};
use crate::domain::model::{BlockEntity, BoardEntity, CardEntity};
use crate::persistence::{MigrationReport, MigrationStatus};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;

/// 命令執行結果；可輸出為文字或 JSON
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Migrations(MigrationReport),
    MigrationStatus(Vec<MigrationStatus>),
    Board(BoardEntity),
    Boards(Vec<BoardEntity>),
    BoardDetails(BoardDetails),
    BoardDeleted { id: i64, deleted: bool },
    Column(BoardColumnDetails),
    Card(CardEntity),
    CardDetails(CardDetails),
    Blocks { card_id: i64, blocks: Vec<BlockEntity> },
    Message { message: String },
}

impl CommandOutput {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        self.to_string().trim_end().to_string()
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Migrations(report) => {
                if report.applied.is_empty() {
                    writeln!(out, "✅ Schema is up to date ({} applied)", report.skipped)?;
                } else {
                    writeln!(out, "✅ Applied {} migration(s):", report.applied.len())?;
                    for id in &report.applied {
                        writeln!(out, "  - {}", id)?;
                    }
                }
            }
            Self::MigrationStatus(statuses) => {
                for status in statuses {
                    match status.applied_at {
                        Some(at) => writeln!(
                            out,
                            "[applied {}] {} {}",
                            at.format("%Y-%m-%d %H:%M:%S"),
                            status.id,
                            status.description
                        )?,
                        None => writeln!(out, "[pending] {} {}", status.id, status.description)?,
                    }
                }
            }
            Self::Board(board) => {
                writeln!(out, "✅ Board {} - {}", board.id, board.name)?;
                for column in &board.columns {
                    writeln!(
                        out,
                        "  {}. [{}] {} (id {})",
                        column.order, column.kind, column.name, column.id
                    )?;
                }
            }
            Self::Boards(boards) => {
                if boards.is_empty() {
                    writeln!(out, "No boards yet")?;
                }
                for board in boards {
                    writeln!(out, "{} - {}", board.id, board.name)?;
                }
            }
            Self::BoardDetails(details) => {
                writeln!(out, "Board {} - {}", details.id, details.name)?;
                for column in &details.columns {
                    writeln!(
                        out,
                        "  {} (id {}, kind {}) has {} card(s)",
                        column.name, column.id, column.kind, column.cards_amount
                    )?;
                }
            }
            Self::BoardDeleted { id, deleted } => {
                if *deleted {
                    writeln!(out, "🗑️ Board {} deleted", id)?;
                } else {
                    writeln!(out, "Board {} not found, nothing deleted", id)?;
                }
            }
            Self::Column(column) => {
                writeln!(
                    out,
                    "Column {} - {} [{}] of board {}",
                    column.id, column.name, column.kind, column.board_id
                )?;
                for card in &column.cards {
                    writeln!(
                        out,
                        "  Card {} - {}{}",
                        card.id,
                        card.title,
                        if card.blocked { " (blocked)" } else { "" }
                    )?;
                    if !card.description.is_empty() {
                        writeln!(out, "    {}", card.description)?;
                    }
                }
            }
            Self::Card(card) => {
                writeln!(
                    out,
                    "✅ Card {} - {} (column {})",
                    card.id, card.title, card.board_column_id
                )?;
            }
            Self::CardDetails(card) => {
                writeln!(out, "Card {} - {}", card.id, card.title)?;
                if !card.description.is_empty() {
                    writeln!(out, "  {}", card.description)?;
                }
                match (&card.blocked_at, &card.block_reason) {
                    (Some(at), Some(reason)) => writeln!(
                        out,
                        "  🔒 Blocked since {}: {}",
                        at.format("%Y-%m-%d %H:%M:%S"),
                        reason
                    )?,
                    _ => writeln!(out, "  Not blocked")?,
                }
                writeln!(out, "  Blocked {} time(s)", card.blocks_amount)?;
                writeln!(
                    out,
                    "  Currently in column {} - {}",
                    card.column_id, card.column_name
                )?;
            }
            Self::Blocks { card_id, blocks } => {
                if blocks.is_empty() {
                    writeln!(out, "Card {} was never blocked", card_id)?;
                }
                for block in blocks {
                    writeln!(
                        out,
                        "{} blocked: {}",
                        block.blocked_at.format("%Y-%m-%d %H:%M:%S"),
                        block.block_reason
                    )?;
                    if let (Some(at), Some(reason)) = (&block.unblocked_at, &block.unblock_reason)
                    {
                        writeln!(
                            out,
                            "{} unblocked: {}",
                            at.format("%Y-%m-%d %H:%M:%S"),
                            reason
                        )?;
                    }
                }
            }
            Self::Message { message } => writeln!(out, "{}", message)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::BoardColumnSummary;
    use crate::domain::model::BoardColumnKind;

    #[test]
    fn test_board_details_text() {
        let output = CommandOutput::BoardDetails(BoardDetails {
            id: 1,
            name: "Release".to_string(),
            columns: vec![BoardColumnSummary {
                id: 3,
                name: "To do".to_string(),
                kind: BoardColumnKind::Initial,
                cards_amount: 2,
            }],
        });

        let text = output.to_text();
        assert!(text.starts_with("Board 1 - Release"));
        assert!(text.contains("To do (id 3, kind INITIAL) has 2 card(s)"));
    }

    #[test]
    fn test_json_is_untagged() {
        let output = CommandOutput::BoardDeleted { id: 4, deleted: true };
        let value: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"id": 4, "deleted": true}));

        let output = CommandOutput::message("done");
        assert_eq!(output.to_text(), "done");
    }

    #[test]
    fn test_display_matches_text_output() {
        let output = CommandOutput::Blocks {
            card_id: 9,
            blocks: Vec::new(),
        };
        assert_eq!(output.to_string(), "Card 9 was never blocked\n");
        assert_eq!(output.to_text(), "Card 9 was never blocked");
    }
}
