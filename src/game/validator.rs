use crate::{
    dictionary::Dictionary,
    game::GameError,
    models::{Board, Card},
    utils::words::normalize_word,
};

/// Checks a spymaster's clue against the board and dictionary
pub struct ClueValidator<'a> {
    dictionary: &'a Dictionary,
}

impl<'a> ClueValidator<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self { dictionary }
    }

    /// Validate a clue. Returns the normalised word and the count.
    pub fn validate(&self, board: &Board, word: &str, count: i64) -> Result<(String, u32), GameError> {
        let count = u32::try_from(count).map_err(|_| GameError::InvalidCount(count))?;
        let word = normalize_word(word);

        // Revealed words are fair game, hidden ones are not
        if find_card(board, &word).is_some_and(|card| !card.selected) {
            return Err(GameError::ClueOnBoard(word));
        }

        if !self.dictionary.contains(&word) {
            return Err(GameError::NotInDictionary(word));
        }

        Ok((word, count))
    }
}

/// Locate the card for a (normalised) word
pub fn find_card<'b>(board: &'b Board, word: &str) -> Option<&'b Card> {
    board.iter().find(|card| card.word == word)
}

/// Index of the card for a (normalised) word
pub fn find_card_index(board: &Board, word: &str) -> Option<usize> {
    board.iter().position(|card| card.word == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        let mut board: Board = ["APPLE", "RIVER"]
            .into_iter()
            .map(|w| Card::new(w.to_string()))
            .collect();
        board[1].selected = true;
        board
    }

    #[test]
    fn test_valid_clue() {
        let dict = Dictionary::from_words(["fruit"]);
        let validator = ClueValidator::new(&dict);
        assert_eq!(
            validator.validate(&board(), " Fruit", 2),
            Ok(("FRUIT".to_string(), 2))
        );
    }

    #[test]
    fn test_negative_count_rejected() {
        let dict = Dictionary::from_words(["fruit"]);
        let validator = ClueValidator::new(&dict);
        assert_eq!(
            validator.validate(&board(), "fruit", -1),
            Err(GameError::InvalidCount(-1))
        );
    }

    #[test]
    fn test_hidden_board_word_rejected() {
        let dict = Dictionary::from_words(["apple"]);
        let validator = ClueValidator::new(&dict);
        assert_eq!(
            validator.validate(&board(), "apple", 1),
            Err(GameError::ClueOnBoard("APPLE".to_string()))
        );
    }

    #[test]
    fn test_revealed_board_word_allowed() {
        let dict = Dictionary::from_words(["river"]);
        let validator = ClueValidator::new(&dict);
        assert!(validator.validate(&board(), "river", 1).is_ok());
    }

    #[test]
    fn test_unknown_word_rejected() {
        let dict = Dictionary::empty();
        let validator = ClueValidator::new(&dict);
        assert_eq!(
            validator.validate(&board(), "zebra", 1),
            Err(GameError::NotInDictionary("ZEBRA".to_string()))
        );
    }

    #[test]
    fn test_find_card() {
        let board = board();
        assert_eq!(find_card_index(&board, "RIVER"), Some(1));
        assert!(find_card(&board, "OCEAN").is_none());
    }
}
