use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::game::GameError;

/// Player identities are opaque usernames supplied by the client
pub type PlayerId = String;

/// One of the two team slots. `Red` is slot 0, `Blue` is slot 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamId {
    Red,
    Blue,
}

impl TeamId {
    pub const ALL: [TeamId; 2] = [TeamId::Red, TeamId::Blue];

    pub fn other(self) -> Self {
        match self {
            TeamId::Red => TeamId::Blue,
            TeamId::Blue => TeamId::Red,
        }
    }

    pub fn index(self) -> usize {
        match self {
            TeamId::Red => 0,
            TeamId::Blue => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeamId::Red => "red",
            TeamId::Blue => "blue",
        }
    }

    /// Card color that belongs to this team
    pub fn color(self) -> CardColor {
        match self {
            TeamId::Red => CardColor::Red,
            TeamId::Blue => CardColor::Blue,
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(TeamId::Red),
            "blue" => Ok(TeamId::Blue),
            other => Err(GameError::InvalidTeam(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Blue,
    /// Neutral bystander
    Gray,
    /// The assassin
    Black,
    /// Not yet assigned
    None,
}

impl CardColor {
    /// The team owning this color, if any
    pub fn team(self) -> Option<TeamId> {
        match self {
            CardColor::Red => Some(TeamId::Red),
            CardColor::Blue => Some(TeamId::Blue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    GiveClue,
    SelectWord,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Setup => "setup",
            Phase::GiveClue => "give_clue",
            Phase::SelectWord => "select_word",
            Phase::GameOver => "game_over",
        };
        f.write_str(label)
    }
}

/// A single board cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub word: String,
    pub color: CardColor,
    pub selected: bool,
}

impl Card {
    pub fn new(word: String) -> Self {
        Self {
            word,
            color: CardColor::None,
            selected: false,
        }
    }
}

pub type Board = Vec<Card>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub word: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub players: Vec<PlayerId>,
    /// Always a member of `players` when set
    pub spymaster: Option<PlayerId>,
}

impl Team {
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            players: Vec::new(),
            spymaster: None,
        }
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p == player_id)
    }

    pub fn is_spymaster(&self, player_id: &str) -> bool {
        self.spymaster.as_deref() == Some(player_id)
    }

    /// Drop a member, clearing the spymaster slot if they held it.
    /// Returns true if the player was on this team.
    pub fn remove(&mut self, player_id: &str) -> bool {
        if self.is_spymaster(player_id) {
            self.spymaster = None;
        }
        let before = self.players.len();
        self.players.retain(|p| p != player_id);
        self.players.len() != before
    }
}

/// Snapshot of a game published to every participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: String,
    pub phase: Phase,
    pub active_team: TeamId,
    pub clue: Option<Clue>,
    pub remaining_guesses: u32,
    pub remaining_red_cards: u32,
    pub remaining_blue_cards: u32,
    pub board: Board,
    pub winner: Option<TeamId>,
}
