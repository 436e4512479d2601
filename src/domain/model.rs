use crate::utils::error::{BoardError, Result};
use crate::utils::validation::{validate_max_length, validate_non_empty_string, MAX_TEXT_LENGTH};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoardColumnKind {
    Initial,
    Pending,
    Final,
    Cancel,
}

impl BoardColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "INITIAL",
            Self::Pending => "PENDING",
            Self::Final => "FINAL",
            Self::Cancel => "CANCEL",
        }
    }

    /// 卡片在此類欄位中不能再移動或封鎖
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Final | Self::Cancel)
    }
}

impl fmt::Display for BoardColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardColumnKind {
    type Err = BoardError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "INITIAL" => Ok(Self::Initial),
            "PENDING" => Ok(Self::Pending),
            "FINAL" => Ok(Self::Final),
            "CANCEL" => Ok(Self::Cancel),
            other => Err(BoardError::validation(
                "column.kind",
                format!("unknown column kind '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEntity {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub columns: Vec<BoardColumnEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumnEntity {
    pub id: i64,
    pub name: String,
    pub order: i32,
    pub kind: BoardColumnKind,
    pub board_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEntity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub board_column_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntity {
    pub id: i64,
    pub blocked_at: DateTime<Utc>,
    pub block_reason: String,
    pub unblocked_at: Option<DateTime<Utc>>,
    pub unblock_reason: Option<String>,
    pub card_id: i64,
}

impl BlockEntity {
    pub fn is_open(&self) -> bool {
        self.unblocked_at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoardColumn {
    pub name: String,
    pub kind: BoardColumnKind,
}

impl NewBoardColumn {
    pub fn new(name: impl Into<String>, kind: BoardColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// 新看板；欄位順序即為 `order`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoard {
    pub name: String,
    pub columns: Vec<NewBoardColumn>,
}

impl NewBoard {
    /// 建立標準配置：初始欄、任意數量的待辦欄、完成欄、取消欄
    pub fn with_standard_layout(
        name: impl Into<String>,
        initial: impl Into<String>,
        pending: impl IntoIterator<Item = String>,
        final_column: impl Into<String>,
        cancel: impl Into<String>,
    ) -> Self {
        let mut columns = vec![NewBoardColumn::new(initial, BoardColumnKind::Initial)];
        columns.extend(
            pending
                .into_iter()
                .map(|name| NewBoardColumn::new(name, BoardColumnKind::Pending)),
        );
        columns.push(NewBoardColumn::new(final_column, BoardColumnKind::Final));
        columns.push(NewBoardColumn::new(cancel, BoardColumnKind::Cancel));

        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_non_empty_string("board.name", &self.name)?;
        for column in &self.columns {
            validate_non_empty_string("column.name", &column.name)?;
        }
        validate_column_layout(&self.columns)
    }
}

/// INITIAL 在最前、CANCEL 在最後、FINAL 緊接在 CANCEL 之前，其餘皆為 PENDING
pub fn validate_column_layout(columns: &[NewBoardColumn]) -> Result<()> {
    if columns.is_empty() {
        return Err(BoardError::validation(
            "board.columns",
            "a board must have at least one column",
        ));
    }

    let count = |kind: BoardColumnKind| columns.iter().filter(|c| c.kind == kind).count();
    for kind in [
        BoardColumnKind::Initial,
        BoardColumnKind::Final,
        BoardColumnKind::Cancel,
    ] {
        if count(kind) != 1 {
            return Err(BoardError::validation(
                "board.columns",
                format!("a board needs exactly one {} column", kind),
            ));
        }
    }

    let last = columns.len() - 1;
    if columns[0].kind != BoardColumnKind::Initial {
        return Err(BoardError::validation(
            "board.columns",
            "the INITIAL column must come first",
        ));
    }
    if columns[last].kind != BoardColumnKind::Cancel {
        return Err(BoardError::validation(
            "board.columns",
            "the CANCEL column must come last",
        ));
    }
    if columns[last - 1].kind != BoardColumnKind::Final {
        return Err(BoardError::validation(
            "board.columns",
            "the FINAL column must come right before the CANCEL column",
        ));
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub title: String,
    pub description: String,
    pub board_column_id: i64,
}

impl NewCard {
    pub fn validate(&self) -> Result<()> {
        validate_non_empty_string("card.title", &self.title)?;
        validate_max_length("card.description", &self.description, MAX_TEXT_LENGTH)?;
        crate::utils::validation::validate_positive_id("card.board_column_id", self.board_column_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(pending: &[&str]) -> NewBoard {
        NewBoard::with_standard_layout(
            "Release",
            "Backlog",
            pending.iter().map(|p| p.to_string()),
            "Done",
            "Dropped",
        )
    }

    #[test]
    fn test_column_kind_round_trip_through_text() {
        for kind in [
            BoardColumnKind::Initial,
            BoardColumnKind::Pending,
            BoardColumnKind::Final,
            BoardColumnKind::Cancel,
        ] {
            assert_eq!(kind.as_str().parse::<BoardColumnKind>().unwrap(), kind);
        }
        assert_eq!("final".parse::<BoardColumnKind>().unwrap(), BoardColumnKind::Final);
        assert!("DONE".parse::<BoardColumnKind>().is_err());
    }

    #[test]
    fn test_standard_layout_is_valid() {
        let board = standard(&["Doing", "Review"]);
        assert_eq!(board.columns.len(), 5);
        assert_eq!(board.columns[1].kind, BoardColumnKind::Pending);
        assert!(board.validate().is_ok());

        assert!(standard(&[]).validate().is_ok());
    }

    #[test]
    fn test_layout_rejects_misplaced_columns() {
        let mut board = standard(&["Doing"]);
        board.columns.swap(0, 1);
        assert!(board.validate().is_err());

        let mut board = standard(&["Doing"]);
        let len = board.columns.len();
        board.columns.swap(len - 1, len - 2);
        assert!(board.validate().is_err());

        let mut board = standard(&["Doing"]);
        board.columns.insert(2, NewBoardColumn::new("Other", BoardColumnKind::Final));
        assert!(board.validate().is_err());

        let board = NewBoard {
            name: "Empty".to_string(),
            columns: vec![],
        };
        assert!(board.validate().is_err());
    }

    #[test]
    fn test_layout_rejects_blank_names() {
        assert!(NewBoard::with_standard_layout(" ", "a", Vec::new(), "b", "c")
            .validate()
            .is_err());
        assert!(NewBoard::with_standard_layout("Board", "a", vec![" ".to_string()], "b", "c")
            .validate()
            .is_err());
    }

    #[test]
    fn test_new_card_validation() {
        let card = NewCard {
            title: "Write docs".to_string(),
            description: String::new(),
            board_column_id: 1,
        };
        assert!(card.validate().is_ok());

        let blank = NewCard {
            title: "".to_string(),
            ..card.clone()
        };
        assert!(blank.validate().is_err());

        let no_column = NewCard {
            board_column_id: 0,
            ..card
        };
        assert!(no_column.validate().is_err());
    }
}
