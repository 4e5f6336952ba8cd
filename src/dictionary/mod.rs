use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use anyhow::{ensure, Context, Result};

use crate::utils::words::{normalize_word, parse_word_list};

pub mod word_pool;

pub use word_pool::WordPool;

/// Words that are legal as clues
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load dictionary from a file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read dictionary {}", path.display()))?;
        let dictionary = Self::from_words(parse_word_list(&content));
        ensure!(
            !dictionary.is_empty(),
            "dictionary {} contains no words",
            path.display()
        );

        tracing::info!("Loaded {} words into dictionary", dictionary.len());

        Ok(dictionary)
    }

    /// Build a dictionary from an in-memory word list
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize_word(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Create an empty dictionary
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Check if a word exists in the dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&normalize_word(word))
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_dictionary() {
        let dict = Dictionary::empty();
        assert!(dict.is_empty());
        assert!(!dict.contains("TEST"));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let dict = Dictionary::from_words(["Fruit", "ocean"]);
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("fruit"));
        assert!(dict.contains(" OCEAN "));
        assert!(!dict.contains("river"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fruit\r\nocean\n\n# comment\nfruit").unwrap();

        let dict = tokio_test::block_on(Dictionary::load(file.path())).unwrap();
        assert_eq!(dict.len(), 2, "Duplicates and comments should not be counted");
        assert!(dict.contains("Ocean"));
    }

    #[tokio::test]
    async fn test_load_file_without_words_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here\n\n").unwrap();

        let result = Dictionary::load(file.path()).await;
        assert!(result.is_err(), "A dictionary without words accepts no clue");
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let result = Dictionary::load("/definitely/not/a/dictionary.txt").await;
        assert!(result.is_err());
    }
}
