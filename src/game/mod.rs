// Rules engine for a single game

pub mod board;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod validator;

pub use board::{BoardGenerator, BOARD_SIZE};
pub use engine::Game;
pub use error::{BoardError, GameError, GameResult};
pub use outcome::{GameOverReason, SelectionOutcome};
pub use validator::ClueValidator;
