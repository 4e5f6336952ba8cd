//! Live game sessions: the registry of running games and the players
//! connected to each of them.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Instant,
};

use dashmap::{mapref::entry::Entry, DashMap};
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    dictionary::{Dictionary, WordPool},
    game::{Game, GameError, GameResult},
    models::GameState,
    websocket::messages::{ServerMessage, TeamInfo},
};

/// Allowed characters for game codes
pub const GAME_CODE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
/// Length of generated game codes
pub const GAME_CODE_LENGTH: usize = 6;
/// How many random codes to try before giving up on creating a game
pub const MAX_CODE_ATTEMPTS: usize = 10;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid username")]
    InvalidUsername,
    #[error("Max concurrent game instances reached")]
    TooManyGames,
    #[error("Unable to create new game")]
    NoFreeGameCode,
    #[error("Nonexistent game ID {0}")]
    UnknownGame(String),
    #[error("Unable to join game due to duplicate username {0}")]
    DuplicateUsername(String),
    #[error("Already in game {0}")]
    AlreadyInGame(String),
    #[error("Not in a game")]
    NotInGame,
    #[error(transparent)]
    Game(#[from] GameError),
}

/// A connected player in a game session
#[derive(Debug, Clone)]
pub struct SessionPlayer {
    pub connection_id: Uuid,
    pub username: String,
    pub tx: mpsc::Sender<ServerMessage>,
}

/// One running game plus its connections
pub struct GameSession {
    pub game: Game,
    /// Connected players in join order
    pub players: Vec<SessionPlayer>,
    pub created_at: Instant,
}

impl GameSession {
    pub fn has_username(&self, username: &str) -> bool {
        self.players.iter().any(|p| p.username == username)
    }

    /// Reset the game and put every connected player back on the roster
    pub fn reset(&mut self) -> GameResult<()> {
        self.game.reset();

        let creator = self.game.creator().to_string();
        if !self.has_username(&creator) {
            self.game.remove_player(&creator);
        }
        for player in &self.players {
            if !self.game.has_player(&player.username) {
                self.game.add_player(&player.username)?;
            }
        }
        Ok(())
    }

    pub fn team_settings(&self) -> ServerMessage {
        ServerMessage::TeamSettings {
            teams: self.game.teams().iter().map(TeamInfo::from).collect(),
            players: self.game.players().to_vec(),
        }
    }

    pub fn game_state(&self) -> ServerMessage {
        ServerMessage::GameState {
            state: self.game.game_state(),
        }
    }

    fn update(&self) -> GameUpdate {
        GameUpdate {
            recipients: self.players.iter().map(|p| p.tx.clone()).collect(),
            team_settings: self.team_settings(),
            game_state: self.game_state(),
        }
    }
}

/// Messages to publish after a change, captured while the session was locked
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub recipients: Vec<mpsc::Sender<ServerMessage>>,
    pub team_settings: ServerMessage,
    pub game_state: ServerMessage,
}

/// All running games keyed by game code
pub struct GameRegistry {
    games: DashMap<String, GameSession>,
    /// Reserved game slots; taken before insert so the limit holds across shards
    slots: AtomicUsize,
    words: Arc<WordPool>,
    dictionary: Arc<Dictionary>,
    max_games: usize,
}

impl GameRegistry {
    pub fn new(words: Arc<WordPool>, dictionary: Arc<Dictionary>, max_games: usize) -> Self {
        Self {
            games: DashMap::new(),
            slots: AtomicUsize::new(0),
            words,
            dictionary,
            max_games,
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.games.contains_key(game_id)
    }

    /// Create a game with `player` as its creator. Returns the game code.
    pub fn create_game(&self, player: SessionPlayer) -> Result<String, SessionError> {
        validate_username(&player.username)?;

        self.slots
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |taken| {
                (taken < self.max_games).then_some(taken + 1)
            })
            .map_err(|_| SessionError::TooManyGames)?;

        for _ in 0..MAX_CODE_ATTEMPTS {
            let game_id = generate_game_code();
            if let Entry::Vacant(entry) = self.games.entry(game_id.clone()) {
                let game = Game::new(
                    game_id.clone(),
                    player.username.clone(),
                    self.words.clone(),
                    self.dictionary.clone(),
                );
                entry.insert(GameSession {
                    game,
                    players: vec![player],
                    created_at: Instant::now(),
                });
                return Ok(game_id);
            }
        }

        self.slots.fetch_sub(1, Ordering::AcqRel);
        Err(SessionError::NoFreeGameCode)
    }

    /// Add a player to an existing game still in setup
    pub fn join_game(&self, game_id: &str, player: SessionPlayer) -> Result<GameUpdate, SessionError> {
        validate_username(&player.username)?;

        let mut session = self
            .games
            .get_mut(game_id)
            .ok_or_else(|| SessionError::UnknownGame(game_id.to_string()))?;

        if session.has_username(&player.username) {
            return Err(SessionError::DuplicateUsername(player.username));
        }

        session.game.add_player(&player.username)?;
        tracing::debug!(
            "[{}] connection {} joined as {}",
            game_id,
            player.connection_id,
            player.username
        );
        session.players.push(player);
        Ok(session.update())
    }

    /// Remove a player from a game. The game is dropped once nobody is
    /// connected, in which case there is no update to publish.
    pub fn leave_game(
        &self,
        game_id: &str,
        username: &str,
    ) -> Result<Option<GameUpdate>, SessionError> {
        let now_empty = {
            let mut session = self
                .games
                .get_mut(game_id)
                .ok_or_else(|| SessionError::UnknownGame(game_id.to_string()))?;
            session.players.retain(|p| p.username != username);
            session.game.remove_player(username);
            session.players.is_empty()
        };

        if now_empty {
            if let Some((_, session)) = self.games.remove_if(game_id, |_, s| s.players.is_empty()) {
                self.slots.fetch_sub(1, Ordering::AcqRel);
                tracing::info!(
                    "Removing game {} after {:?}",
                    game_id,
                    session.created_at.elapsed()
                );
                return Ok(None);
            }
        }

        Ok(self.games.get(game_id).map(|session| session.update()))
    }

    /// Run one operation against a game while holding its entry exclusively
    pub fn update<T>(
        &self,
        game_id: &str,
        op: impl FnOnce(&mut GameSession) -> GameResult<T>,
    ) -> Result<(T, GameUpdate), SessionError> {
        let mut session = self
            .games
            .get_mut(game_id)
            .ok_or_else(|| SessionError::UnknownGame(game_id.to_string()))?;
        let value = op(session.value_mut())?;
        Ok((value, session.update()))
    }

    pub fn snapshot(&self, game_id: &str) -> Option<GameState> {
        self.games.get(game_id).map(|session| session.game.game_state())
    }
}

fn validate_username(username: &str) -> Result<(), SessionError> {
    if username.trim().is_empty() {
        return Err(SessionError::InvalidUsername);
    }
    Ok(())
}

/// Generate a short lowercase game code
pub fn generate_game_code() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    (0..GAME_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..GAME_CODE_CHARSET.len());
            GAME_CODE_CHARSET[idx] as char
        })
        .collect()
}
