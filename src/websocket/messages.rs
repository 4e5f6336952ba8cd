use serde::{Deserialize, Serialize};
use crate::models::{GameState as GameStateSnapshot, PlayerId, Team, TeamId};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    CreateGame {
        username: String,
    },
    JoinGame {
        game_id: String,
        username: String,
    },
    LeaveGame,
    /// Team labels are validated by the server, so they arrive as strings
    SelectTeam {
        team: String,
    },
    SelectSpymaster {
        team: String,
    },
    RandomizeTeams,
    StartGame,
    ResetGame,
    GiveClue {
        word: String,
        count: i64,
    },
    SelectWord {
        word: String,
    },
    PassTurn,
    GetState,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameCreated {
        game_id: String,
    },
    GameJoined {
        game_id: String,
    },
    TeamSettings {
        teams: Vec<TeamInfo>,
        players: Vec<PlayerId>,
    },
    GameState {
        state: GameStateSnapshot,
    },
    PlayerLeft {
        username: String,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: TeamId,
    pub players: Vec<PlayerId>,
    pub spymaster: Option<PlayerId>,
}

impl From<&Team> for TeamInfo {
    fn from(team: &Team) -> Self {
        Self {
            name: team.id,
            players: team.players.clone(),
            spymaster: team.spymaster.clone(),
        }
    }
}
