use rand::{
    seq::{IndexedRandom, SliceRandom},
    Rng,
};

use crate::{
    dictionary::WordPool,
    game::BoardError,
    models::{Board, Card, CardColor, TeamId},
};

pub const BOARD_SIZE: usize = 25;
/// Cards per team before the starting team's extra card
pub const TEAM_CARDS: u32 = 8;
pub const GRAY_CARDS: u32 = 7;
pub const BLACK_CARDS: u32 = 1;

/// Result of laying out a fresh board
#[derive(Debug, Clone)]
pub struct GeneratedBoard {
    pub board: Board,
    pub starting_team: TeamId,
    pub red_cards: u32,
    pub blue_cards: u32,
}

pub struct BoardGenerator;

impl BoardGenerator {
    /// Draw the words, pick the starting team and color the cards
    pub fn generate(pool: &WordPool, rng: &mut impl Rng) -> Result<GeneratedBoard, BoardError> {
        let mut board = Self::draw_words(pool, rng)?;

        let starting_team = if rng.random_bool(0.5) {
            TeamId::Red
        } else {
            TeamId::Blue
        };
        let (red_cards, blue_cards) = match starting_team {
            TeamId::Red => (TEAM_CARDS + 1, TEAM_CARDS),
            TeamId::Blue => (TEAM_CARDS, TEAM_CARDS + 1),
        };

        Self::assign_colors(&mut board, red_cards, blue_cards);

        // Colors went on in board order; re-randomise word/color pairing
        board.shuffle(rng);

        Ok(GeneratedBoard {
            board,
            starting_team,
            red_cards,
            blue_cards,
        })
    }

    /// Pick `BOARD_SIZE` distinct words from the pool, all uncolored
    fn draw_words(pool: &WordPool, rng: &mut impl Rng) -> Result<Board, BoardError> {
        if pool.len() < BOARD_SIZE {
            return Err(BoardError::NotEnoughWords {
                available: pool.len(),
                required: BOARD_SIZE,
            });
        }

        Ok(pool
            .words()
            .choose_multiple(rng, BOARD_SIZE)
            .map(|word| Card::new(word.clone()))
            .collect())
    }

    /// Fill red, then blue, then gray, then black, in board order
    fn assign_colors(board: &mut Board, red_cards: u32, blue_cards: u32) {
        let layout = [
            (CardColor::Red, red_cards),
            (CardColor::Blue, blue_cards),
            (CardColor::Gray, GRAY_CARDS),
            (CardColor::Black, BLACK_CARDS),
        ];
        let colors = layout
            .iter()
            .flat_map(|&(color, count)| std::iter::repeat(color).take(count as usize));

        for (card, color) in board.iter_mut().zip(colors) {
            card.color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn pool(size: usize) -> WordPool {
        WordPool::from_words((0..size).map(|i| format!("word{}", i)))
    }

    fn count(board: &Board, color: CardColor) -> u32 {
        board.iter().filter(|c| c.color == color).count() as u32
    }

    #[test]
    fn test_board_generation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let generated = BoardGenerator::generate(&pool(100), &mut rng).unwrap();

        assert_eq!(generated.board.len(), BOARD_SIZE);
        assert!(generated.board.iter().all(|c| !c.selected));

        let unique: HashSet<_> = generated.board.iter().map(|c| &c.word).collect();
        assert_eq!(unique.len(), BOARD_SIZE, "Board words must be distinct");
    }

    #[test]
    fn test_color_distribution_favours_starting_team() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let generated = BoardGenerator::generate(&pool(40), &mut rng).unwrap();
            let board = &generated.board;

            let starting = generated.starting_team.color();
            let other = generated.starting_team.other().color();
            assert_eq!(count(board, starting), 9, "seed {}", seed);
            assert_eq!(count(board, other), 8, "seed {}", seed);
            assert_eq!(count(board, CardColor::Gray), 7, "seed {}", seed);
            assert_eq!(count(board, CardColor::Black), 1, "seed {}", seed);
            assert_eq!(count(board, CardColor::None), 0, "seed {}", seed);

            assert_eq!(generated.red_cards, count(board, CardColor::Red));
            assert_eq!(generated.blue_cards, count(board, CardColor::Blue));
        }
    }

    #[test]
    fn test_both_teams_can_start() {
        let starters: HashSet<TeamId> = (0..64)
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                BoardGenerator::generate(&pool(30), &mut rng)
                    .unwrap()
                    .starting_team
            })
            .collect();
        assert_eq!(starters.len(), 2, "Coin flip should pick both teams over 64 games");
    }

    #[test]
    fn test_exact_pool_size_uses_every_word() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let generated = BoardGenerator::generate(&pool(BOARD_SIZE), &mut rng).unwrap();
        let words: HashSet<_> = generated.board.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words.len(), BOARD_SIZE);
    }

    #[test]
    fn test_small_pool_fails_instead_of_looping() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = BoardGenerator::generate(&pool(24), &mut rng).unwrap_err();
        assert_eq!(
            err,
            BoardError::NotEnoughWords {
                available: 24,
                required: BOARD_SIZE
            }
        );
    }

    #[test]
    fn test_assign_colors_in_board_order() {
        let mut board: Board = (0..BOARD_SIZE).map(|i| Card::new(i.to_string())).collect();
        BoardGenerator::assign_colors(&mut board, 9, 8);

        assert!(board[..9].iter().all(|c| c.color == CardColor::Red));
        assert!(board[9..17].iter().all(|c| c.color == CardColor::Blue));
        assert!(board[17..24].iter().all(|c| c.color == CardColor::Gray));
        assert_eq!(board[24].color, CardColor::Black);
    }
}
