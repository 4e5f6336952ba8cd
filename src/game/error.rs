use thiserror::Error;

use crate::models::Phase;

/// Board generation failures. These indicate a misconfigured word pool,
/// not a player mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("word pool has {available} distinct words, {required} are required")]
    NotEnoughWords { available: usize, required: usize },
}

/// Rejections of a single engine operation. The game is left untouched
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot {action} in phase '{phase}'")]
    InvalidPhase { action: &'static str, phase: Phase },

    #[error("{0} is not a current player")]
    UnknownPlayer(String),

    #[error("{0} is an invalid team")]
    InvalidTeam(String),

    #[error("{0} is already a player")]
    DuplicatePlayer(String),

    #[error("{0} is not a spymaster")]
    NotSpymaster(String),

    #[error("{0} is a spymaster")]
    IsSpymaster(String),

    #[error("{0} is not on the active team")]
    WrongTeam(String),

    #[error("{0} is not a valid clue count")]
    InvalidCount(i64),

    #[error("{0} is on the board and cannot be used as a clue")]
    ClueOnBoard(String),

    #[error("{0} is not in the dictionary")]
    NotInDictionary(String),

    #[error("{0} does not exist on the board")]
    UnknownWord(String),

    #[error("{0} has already been selected")]
    AlreadySelected(String),

    #[error("start requirements have not been met")]
    NotReady,

    #[error(transparent)]
    Board(#[from] BoardError),
}

pub type GameResult<T> = std::result::Result<T, GameError>;
