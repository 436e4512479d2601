use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Apply pending schema migrations
    Migrate {
        /// Only show which migrations are applied
        #[arg(long)]
        status: bool,
    },
    /// Manage boards
    #[command(subcommand)]
    Board(BoardCommand),
    /// Inspect board columns
    #[command(subcommand)]
    Column(ColumnCommand),
    /// Manage cards
    #[command(subcommand)]
    Card(CardCommand),
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum BoardCommand {
    /// Create a board with initial, pending, final and cancel columns
    Create(CreateBoardArgs),
    /// List all boards
    List,
    /// Show a board with its columns and card counts
    Show { id: i64 },
    /// Delete a board together with its columns and cards
    Delete { id: i64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct CreateBoardArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "To do")]
    pub initial: String,

    /// Pending column, repeat for several columns in order
    #[arg(long = "pending")]
    pub pending: Vec<String>,

    #[arg(long = "final", default_value = "Done")]
    pub final_column: String,

    #[arg(long, default_value = "Cancelled")]
    pub cancel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum ColumnCommand {
    /// Show a column and its cards
    Show { id: i64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum CardCommand {
    /// Create a card in the board's initial column
    Create {
        #[arg(long)]
        board: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Show card details
    Show { id: i64 },
    /// Show the block history of a card
    Blocks { id: i64 },
    /// Change the title or description of a card
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Move a card to the next column of its board
    Move {
        #[arg(long)]
        board: i64,
        id: i64,
    },
    /// Move a card to the board's cancel column
    Cancel {
        #[arg(long)]
        board: i64,
        id: i64,
    },
    /// Block a card
    Block {
        #[arg(long)]
        board: i64,
        id: i64,
        #[arg(long)]
        reason: String,
    },
    /// Unblock a card
    Unblock {
        id: i64,
        #[arg(long)]
        reason: String,
    },
}
