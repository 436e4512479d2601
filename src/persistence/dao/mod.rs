//! Data access objects. Each one borrows the caller's connection so that
//! several DAOs can take part in the same transaction.

pub mod block;
pub mod board;
pub mod board_column;
pub mod card;

pub use block::BlockDao;
pub use board::BoardDao;
pub use board_column::BoardColumnDao;
pub use card::CardDao;
