// Puzzle engine: word selection, scrambling and tile placement

pub mod board;
pub mod round;
pub mod scramble;

pub use board::Board;
pub use round::Round;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("word list has {available} usable words, at least 2 are needed")]
    NotEnoughWords { available: usize },
    #[error("the draw pile is empty")]
    EmptyDrawPile,
    #[error("no round in progress")]
    NoRoundInProgress,
    #[error("session {0} not found")]
    SessionNotFound(Uuid),
}
