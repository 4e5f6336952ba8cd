use serde::Serialize;

use crate::models::{CardColor, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// A team has no hidden cards left
    AllCardsFound,
    /// The active team revealed the black card
    Assassin,
}

/// What happens after a card is revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectionOutcome {
    GameOver { winner: TeamId, reason: GameOverReason },
    TurnEnded,
    ContinueGuessing,
}

/// Everything needed to judge a reveal, taken after counters were updated
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    pub color: CardColor,
    pub active_team: TeamId,
    pub remaining_red_cards: u32,
    pub remaining_blue_cards: u32,
    pub guesses_exhausted: bool,
}

impl Reveal {
    /// Rules are checked in order; the first match wins.
    pub fn outcome(&self) -> SelectionOutcome {
        let inactive_team = self.active_team.other();

        if self.remaining_red_cards == 0 || self.remaining_blue_cards == 0 {
            let winner = if self.remaining_red_cards == 0 {
                TeamId::Red
            } else {
                TeamId::Blue
            };
            return SelectionOutcome::GameOver {
                winner,
                reason: GameOverReason::AllCardsFound,
            };
        }

        if self.color == inactive_team.color() || self.color == CardColor::Gray {
            return SelectionOutcome::TurnEnded;
        }

        if self.color == CardColor::Black {
            return SelectionOutcome::GameOver {
                winner: inactive_team,
                reason: GameOverReason::Assassin,
            };
        }

        if self.guesses_exhausted {
            return SelectionOutcome::TurnEnded;
        }

        SelectionOutcome::ContinueGuessing
    }
}
