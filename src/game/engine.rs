use std::sync::Arc;

use rand::{rngs::StdRng, seq::IndexedRandom, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    dictionary::{Dictionary, WordPool},
    game::{
        outcome::Reveal, validator::find_card_index, BoardGenerator, ClueValidator, GameError,
        GameResult, SelectionOutcome,
    },
    models::{Board, CardColor, Clue, GameState, Phase, PlayerId, Team, TeamId},
    utils::words::normalize_word,
};

/// Minimum members per team before a game can start
pub const MIN_TEAM_SIZE: usize = 2;

/// Authoritative state of one game.
///
/// Every operation validates all of its preconditions before touching any
/// state, so a returned error always leaves the game exactly as it was.
/// Calls must be serialised by the owner; nothing in here locks.
pub struct Game<R = StdRng> {
    id: String,
    creator: PlayerId,
    players: Vec<PlayerId>,
    teams: [Team; 2],
    phase: Phase,
    active_team: TeamId,
    remaining_guesses: u32,
    remaining_red_cards: u32,
    remaining_blue_cards: u32,
    clue: Option<Clue>,
    board: Board,
    winner: Option<TeamId>,
    words: Arc<WordPool>,
    dictionary: Arc<Dictionary>,
    rng: R,
}

impl Game<StdRng> {
    /// Create a game seeded from the operating system
    pub fn new(
        id: impl Into<String>,
        creator: impl Into<PlayerId>,
        words: Arc<WordPool>,
        dictionary: Arc<Dictionary>,
    ) -> Self {
        Self::with_rng(id, creator, words, dictionary, StdRng::from_os_rng())
    }
}

impl<R: Rng> Game<R> {
    /// Create a game that draws every random choice from `rng`
    pub fn with_rng(
        id: impl Into<String>,
        creator: impl Into<PlayerId>,
        words: Arc<WordPool>,
        dictionary: Arc<Dictionary>,
        rng: R,
    ) -> Self {
        let creator = creator.into();
        Self {
            id: id.into(),
            players: vec![creator.clone()],
            creator,
            teams: [Team::new(TeamId::Red), Team::new(TeamId::Blue)],
            phase: Phase::Setup,
            active_team: TeamId::Red,
            remaining_guesses: 0,
            remaining_red_cards: 0,
            remaining_blue_cards: 0,
            clue: None,
            board: Vec::new(),
            winner: None,
            words,
            dictionary,
            rng,
        }
    }

    /// Back to a fresh setup with the same id. Only the creator stays on the roster.
    pub fn reset(&mut self) {
        self.players = vec![self.creator.clone()];
        self.teams = [Team::new(TeamId::Red), Team::new(TeamId::Blue)];
        self.phase = Phase::Setup;
        self.active_team = TeamId::Red;
        self.remaining_guesses = 0;
        self.remaining_red_cards = 0;
        self.remaining_blue_cards = 0;
        self.clue = None;
        self.board.clear();
        self.winner = None;

        tracing::debug!("[{}] reset to setup", self.id);
    }

    // Accessors

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn team(&self, team_id: TeamId) -> &Team {
        &self.teams[team_id.index()]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_team(&self) -> TeamId {
        self.active_team
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn winner(&self) -> Option<TeamId> {
        self.winner
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p == player_id)
    }

    /// Team the player currently belongs to
    pub fn team_of(&self, player_id: &str) -> Option<TeamId> {
        self.teams
            .iter()
            .find(|team| team.contains(player_id))
            .map(|team| team.id)
    }

    pub fn is_spymaster(&self, player_id: &str) -> bool {
        self.teams.iter().any(|team| team.is_spymaster(player_id))
    }

    /// Snapshot published to every participant. Card colors are included.
    pub fn game_state(&self) -> GameState {
        GameState {
            game_id: self.id.clone(),
            phase: self.phase,
            active_team: self.active_team,
            clue: self.clue.clone(),
            remaining_guesses: self.remaining_guesses,
            remaining_red_cards: self.remaining_red_cards,
            remaining_blue_cards: self.remaining_blue_cards,
            board: self.board.clone(),
            winner: self.winner,
        }
    }

    // Roster and teams

    pub fn add_player(&mut self, player_id: &str) -> GameResult<()> {
        self.ensure_phase(Phase::Setup, "add player")?;

        if self.has_player(player_id) {
            return Err(GameError::DuplicatePlayer(player_id.to_string()));
        }

        self.players.push(player_id.to_string());
        Ok(())
    }

    /// Drop a player from the roster and their team. Absent players are ignored.
    pub fn remove_player(&mut self, player_id: &str) {
        self.players.retain(|p| p != player_id);
        for team in &mut self.teams {
            team.remove(player_id);
        }
    }

    pub fn assign_player_to_team(&mut self, player_id: &str, team_id: TeamId) -> GameResult<()> {
        self.ensure_player(player_id)?;
        self.ensure_phase(Phase::Setup, "assign player to team")?;

        self.move_to_team(player_id, team_id);
        Ok(())
    }

    /// Split the roster into two teams uniformly at random. Red gets
    /// `floor(n / 2)` players and Blue the rest. Spymasters are cleared.
    pub fn assign_teams_randomly(&mut self) -> GameResult<()> {
        self.ensure_phase(Phase::Setup, "assign teams randomly")?;

        let mut roster = self.players.clone();
        roster.shuffle(&mut self.rng);
        let blue = roster.split_off(roster.len() / 2);

        self.teams = [Team::new(TeamId::Red), Team::new(TeamId::Blue)];
        self.teams[TeamId::Red.index()].players = roster;
        self.teams[TeamId::Blue.index()].players = blue;
        Ok(())
    }

    pub fn assign_spymaster(&mut self, player_id: &str, team_id: TeamId) -> GameResult<()> {
        self.ensure_phase(Phase::Setup, "assign spymaster")?;
        self.ensure_player(player_id)?;

        self.move_to_team(player_id, team_id);
        self.teams[team_id.index()].spymaster = Some(player_id.to_string());
        Ok(())
    }

    /// Pick a random spymaster for every team that has members
    pub fn choose_spymasters(&mut self) -> GameResult<()> {
        self.ensure_phase(Phase::Setup, "choose spymasters")?;

        for team in &mut self.teams {
            if let Some(pick) = team.players.choose(&mut self.rng) {
                team.spymaster = Some(pick.clone());
            }
        }
        Ok(())
    }

    pub fn is_ready_to_start(&self) -> bool {
        self.teams
            .iter()
            .all(|team| team.players.len() >= MIN_TEAM_SIZE && team.spymaster.is_some())
    }

    // Lifecycle

    pub fn start(&mut self) -> GameResult<()> {
        self.ensure_phase(Phase::Setup, "start game")?;

        if !self.is_ready_to_start() {
            return Err(GameError::NotReady);
        }

        let generated = match BoardGenerator::generate(&self.words, &mut self.rng) {
            Ok(generated) => generated,
            Err(e) => {
                tracing::error!("[{}] board generation failed: {}", self.id, e);
                return Err(e.into());
            }
        };

        self.board = generated.board;
        self.active_team = generated.starting_team;
        self.remaining_red_cards = generated.red_cards;
        self.remaining_blue_cards = generated.blue_cards;
        self.remaining_guesses = 0;
        self.clue = None;
        self.winner = None;
        self.phase = Phase::GiveClue;

        tracing::debug!("[{}] started, {} team goes first", self.id, self.active_team);
        Ok(())
    }

    // Turns

    pub fn give_clue(&mut self, player_id: &str, word: &str, count: i64) -> GameResult<()> {
        self.ensure_player(player_id)?;
        self.ensure_phase(Phase::GiveClue, "give a clue")?;

        if !self.is_spymaster(player_id) {
            return Err(GameError::NotSpymaster(player_id.to_string()));
        }
        self.ensure_active_team(player_id)?;

        let (word, count) =
            ClueValidator::new(&self.dictionary).validate(&self.board, word, count)?;

        tracing::debug!("[{}] clue {}:{} from {}", self.id, word, count, player_id);

        self.clue = Some(Clue { word, count });
        self.remaining_guesses = count;
        self.phase = Phase::SelectWord;
        Ok(())
    }

    /// Reveal a card for the active team.
    ///
    /// A clue with count 0 allows unlimited guesses: the turn then only ends
    /// on a miss or a pass.
    pub fn select_word(&mut self, player_id: &str, word: &str) -> GameResult<SelectionOutcome> {
        self.ensure_guesser(player_id)?;

        let word = normalize_word(word);
        let index = find_card_index(&self.board, &word)
            .ok_or_else(|| GameError::UnknownWord(word.clone()))?;
        if self.board[index].selected {
            return Err(GameError::AlreadySelected(word));
        }

        let card = &mut self.board[index];
        card.selected = true;
        let color = card.color;

        let unlimited = self.clue.as_ref().is_some_and(|clue| clue.count == 0);
        if !unlimited {
            self.remaining_guesses = self.remaining_guesses.saturating_sub(1);
        }

        match color {
            CardColor::Red => self.remaining_red_cards = self.remaining_red_cards.saturating_sub(1),
            CardColor::Blue => {
                self.remaining_blue_cards = self.remaining_blue_cards.saturating_sub(1)
            }
            _ => {}
        }

        let outcome = Reveal {
            color,
            active_team: self.active_team,
            remaining_red_cards: self.remaining_red_cards,
            remaining_blue_cards: self.remaining_blue_cards,
            guesses_exhausted: !unlimited && self.remaining_guesses == 0,
        }
        .outcome();

        tracing::debug!(
            "[{}] {} selected {} ({:?}) -> {:?}",
            self.id,
            player_id,
            word,
            color,
            outcome
        );

        match outcome {
            SelectionOutcome::GameOver { winner, .. } => self.finish(winner),
            SelectionOutcome::TurnEnded => self.end_turn(),
            SelectionOutcome::ContinueGuessing => {}
        }

        Ok(outcome)
    }

    pub fn pass_turn(&mut self, player_id: &str) -> GameResult<()> {
        self.ensure_guesser(player_id)?;
        self.end_turn();
        Ok(())
    }

    fn end_turn(&mut self) {
        self.remaining_guesses = 0;
        self.clue = None;
        self.active_team = self.active_team.other();
        self.phase = Phase::GiveClue;
    }

    fn finish(&mut self, winner: TeamId) {
        self.winner = Some(winner);
        self.clue = None;
        self.remaining_guesses = 0;
        self.phase = Phase::GameOver;
    }

    /// Put a player on `team_id`, leaving the other team if needed
    fn move_to_team(&mut self, player_id: &str, team_id: TeamId) {
        self.teams[team_id.other().index()].remove(player_id);

        let team = &mut self.teams[team_id.index()];
        if !team.contains(player_id) {
            team.players.push(player_id.to_string());
        }
    }

    // Precondition checks

    fn ensure_phase(&self, expected: Phase, action: &'static str) -> GameResult<()> {
        if self.phase != expected {
            return Err(GameError::InvalidPhase {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn ensure_player(&self, player_id: &str) -> GameResult<()> {
        if !self.has_player(player_id) {
            return Err(GameError::UnknownPlayer(player_id.to_string()));
        }
        Ok(())
    }

    fn ensure_active_team(&self, player_id: &str) -> GameResult<()> {
        if self.team_of(player_id) != Some(self.active_team) {
            return Err(GameError::WrongTeam(player_id.to_string()));
        }
        Ok(())
    }

    /// Checks shared by selecting a word and passing
    fn ensure_guesser(&self, player_id: &str) -> GameResult<()> {
        self.ensure_player(player_id)?;
        self.ensure_phase(Phase::SelectWord, "guess")?;

        if self.is_spymaster(player_id) {
            return Err(GameError::IsSpymaster(player_id.to_string()));
        }
        self.ensure_active_team(player_id)
    }
}
