use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, time::Duration};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub dictionary_path: String,
    /// Only dictionary lines of exactly this many characters are kept
    pub word_length: usize,
    /// Sessions untouched for longer than this are evicted
    pub session_idle_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let game = GameConfig {
            dictionary_path: env::var("DICTIONARY_PATH")
                .unwrap_or_else(|_| "./words.txt".to_string()),
            word_length: env::var("WORD_LENGTH")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("WORD_LENGTH must be a number")?,
            session_idle_timeout_secs: env::var("SESSION_IDLE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "1800".to_string())
                .parse()
                .context("SESSION_IDLE_TIMEOUT_SECS must be a number")?,
        };

        if game.word_length == 0 {
            anyhow::bail!("WORD_LENGTH must be greater than zero");
        }

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.game.session_idle_timeout_secs)
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for router and session tests
    pub fn for_tests() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            game: GameConfig {
                dictionary_path: "./words.txt".to_string(),
                word_length: 5,
                session_idle_timeout_secs: 60,
            },
        }
    }
}
