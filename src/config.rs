use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as the web client
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Newline-separated candidate board words
    pub word_list_path: String,
    /// Newline-separated words accepted as clues
    pub dictionary_path: String,
    /// Maximum number of concurrently running games
    pub max_games: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                static_dir: "./html".to_string(),
            },
            game: GameConfig {
                word_list_path: "./resources/words.txt".to_string(),
                dictionary_path: "./resources/dictionary.txt".to_string(),
                max_games: 100,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or(defaults.server.host),
            port: match env::var("PORT") {
                Ok(port) => port.parse().context("PORT must be a number")?,
                Err(_) => defaults.server.port,
            },
            static_dir: env::var("STATIC_DIR")
                .unwrap_or(defaults.server.static_dir),
        };

        let game = GameConfig {
            word_list_path: env::var("WORD_LIST_PATH")
                .unwrap_or(defaults.game.word_list_path),
            dictionary_path: env::var("DICTIONARY_PATH")
                .unwrap_or(defaults.game.dictionary_path),
            max_games: match env::var("MAX_GAMES") {
                Ok(max) => max.parse().context("MAX_GAMES must be a number")?,
                Err(_) => defaults.game.max_games,
            },
        };

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.game.max_games, 100);
    }

    #[tokio::test]
    async fn test_default_data_files_load() {
        use crate::dictionary::{Dictionary, WordPool};
        use crate::game::BOARD_SIZE;

        let config = Config::default();

        let words = WordPool::load(&config.game.word_list_path).await.unwrap();
        assert!(words.len() >= BOARD_SIZE, "Default word list must fill a board");

        let dictionary = Dictionary::load(&config.game.dictionary_path).await.unwrap();
        assert!(dictionary.contains("fruit"));
        assert!(
            words.words().iter().all(|w| dictionary.contains(w)),
            "Board words should be usable as clues once revealed"
        );
    }
}
