mod common;

use common::TestDb;
use taskboard::domain::model::{BoardColumnKind, NewBoard, NewBoardColumn, NewCard};
use taskboard::BoardError;

#[tokio::test]
async fn test_insert_board_assigns_ids_and_orders() {
    let db = TestDb::new().await;

    let board = db.standard_board("Release 1.0").await;

    assert!(board.id > 0);
    assert_eq!(board.columns.len(), 5);
    let orders: Vec<i32> = board.columns.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3, 4]);
    assert_eq!(board.columns[0].kind, BoardColumnKind::Initial);
    assert_eq!(board.columns[4].kind, BoardColumnKind::Cancel);
    assert!(board.columns.iter().all(|c| c.board_id == board.id));

    let stored = db
        .services
        .board_queries
        .find_by_id(board.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, board);
}

#[tokio::test]
async fn test_insert_rejects_invalid_boards_without_writing() {
    let db = TestDb::new().await;

    let blank = NewBoard::with_standard_layout("  ", "To do", Vec::new(), "Done", "Cancelled");
    let err = db.services.boards.insert(blank).await.unwrap_err();
    assert!(matches!(err, BoardError::ValidationError { .. }));

    let no_cancel = NewBoard {
        name: "Half".to_string(),
        columns: vec![
            NewBoardColumn::new("To do", BoardColumnKind::Initial),
            NewBoardColumn::new("Done", BoardColumnKind::Final),
        ],
    };
    assert!(db.services.boards.insert(no_cancel).await.is_err());

    assert!(db.services.board_queries.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_show_board_details_counts_cards() {
    let db = TestDb::new().await;
    let board = db.standard_board("Counting").await;
    let initial = board.columns[0].id;

    for title in ["one", "two"] {
        db.services
            .cards
            .create(NewCard {
                title: title.to_string(),
                description: String::new(),
                board_column_id: initial,
            })
            .await
            .unwrap();
    }

    let details = db
        .services
        .board_queries
        .show_board_details(board.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(details.name, "Counting");
    assert_eq!(details.columns.len(), 5);
    assert_eq!(details.columns[0].cards_amount, 2);
    assert!(details.columns[1..].iter().all(|c| c.cards_amount == 0));
}

#[tokio::test]
async fn test_list_boards_in_creation_order() {
    let db = TestDb::new().await;
    let first = db.standard_board("First").await;
    let second = db.standard_board("Second").await;

    let boards = db.services.board_queries.list().await.unwrap();
    let ids: Vec<i64> = boards.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert!(boards.iter().all(|b| b.columns.is_empty()));
}

#[tokio::test]
async fn test_delete_board_cascades() {
    let db = TestDb::new().await;
    let board = db.standard_board("Doomed").await;
    let card = db
        .services
        .cards
        .create(NewCard {
            title: "Orphan".to_string(),
            description: String::new(),
            board_column_id: board.columns[0].id,
        })
        .await
        .unwrap();

    assert!(db.services.boards.delete(board.id).await.unwrap());

    assert!(db
        .services
        .board_queries
        .find_by_id(board.id)
        .await
        .unwrap()
        .is_none());
    assert!(db
        .services
        .card_queries
        .find_by_id(card.id)
        .await
        .unwrap()
        .is_none());
    assert!(db
        .services
        .column_queries
        .find_by_id(board.columns[0].id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_delete_missing_board_returns_false() {
    let db = TestDb::new().await;

    assert!(!db.services.boards.delete(42).await.unwrap());

    let err = db.services.boards.delete(0).await.unwrap_err();
    assert!(matches!(err, BoardError::ValidationError { .. }));
}

#[tokio::test]
async fn test_column_details_list_cards() {
    let db = TestDb::new().await;
    let board = db.standard_board("Columns").await;
    let initial = &board.columns[0];

    let card = db
        .services
        .cards
        .create(NewCard {
            title: "Design review".to_string(),
            description: "Read the draft".to_string(),
            board_column_id: initial.id,
        })
        .await
        .unwrap();

    let column = db
        .services
        .column_queries
        .find_by_id(initial.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(column.name, "To do");
    assert_eq!(column.kind, BoardColumnKind::Initial);
    assert_eq!(column.board_id, board.id);
    assert_eq!(column.cards.len(), 1);
    assert_eq!(column.cards[0].id, card.id);
    assert_eq!(column.cards[0].description, "Read the draft");
    assert!(!column.cards[0].blocked);
}

#[tokio::test]
async fn test_failed_column_insert_rolls_back_whole_board() {
    let db = TestDb::new().await;
    sqlx::raw_sql(
        "CREATE TRIGGER reject_final_columns BEFORE INSERT ON BOARDS_COLUMNS
         WHEN NEW.kind = 'FINAL'
         BEGIN
             SELECT RAISE(ABORT, 'final columns are disabled');
         END;",
    )
    .execute(&db.pool)
    .await
    .unwrap();

    let board = NewBoard::with_standard_layout("Atomic", "To do", Vec::new(), "Done", "Cancelled");
    let err = db.services.boards.insert(board).await.unwrap_err();
    assert!(matches!(err, BoardError::DatabaseError(_)));

    let boards: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM BOARDS")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    let columns: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM BOARDS_COLUMNS")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(boards, 0);
    assert_eq!(columns, 0);
}
