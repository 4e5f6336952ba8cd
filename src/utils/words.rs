/// Canonical form used for every word comparison (board, clue, dictionary)
pub fn normalize_word(word: &str) -> String {
    word.trim().to_uppercase()
}

/// Split a newline-separated word list into normalised entries,
/// skipping blank lines and `#` comments. Handles CRLF input.
pub fn parse_word_list(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(normalize_word)
}
