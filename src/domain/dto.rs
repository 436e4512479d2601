use crate::domain::model::BoardColumnKind;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardColumnInfo {
    pub id: i64,
    pub order: i32,
    pub kind: BoardColumnKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardDetails {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub blocked: bool,
    pub blocked_at: Option<DateTime<Utc>>,
    pub block_reason: Option<String>,
    pub blocks_amount: i64,
    pub column_id: i64,
    pub column_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumnSummary {
    pub id: i64,
    pub name: String,
    pub kind: BoardColumnKind,
    pub cards_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardDetails {
    pub id: i64,
    pub name: String,
    pub columns: Vec<BoardColumnSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub blocked: bool,
    pub blocks_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumnDetails {
    pub id: i64,
    pub name: String,
    pub kind: BoardColumnKind,
    pub order: i32,
    pub board_id: i64,
    pub cards: Vec<CardSummary>,
}
