pub mod game;

pub use game::{
    // Identifiers
    PlayerId, TeamId,
    // Board types
    Board, Card, CardColor,
    // Live game state
    Clue, GameState, Phase, Team,
};
