use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::{
    dictionary::WordList,
    models::{Placement, RoundSnapshot, TargetRow, Tile},
};

use super::{
    scramble::{is_subsequence, merge_shuffle, pick_two_indices},
    Board, GameError,
};

/// One puzzle: two hidden words and the tiles scrambled from them
#[derive(Debug, Clone)]
pub struct Round {
    word1: String,
    word2: String,
    scrambled: String,
    board: Board,
    started_at: DateTime<Utc>,
}

impl Round {
    /// Deal a round from two distinct entries of the word list
    pub fn deal(words: &WordList, rng: &mut impl Rng) -> Result<Self, GameError> {
        let available = words.len();
        let (index1, index2) = pick_two_indices(available, rng)?;
        let word1 = words
            .get(index1)
            .ok_or(GameError::NotEnoughWords { available })?;
        let word2 = words
            .get(index2)
            .ok_or(GameError::NotEnoughWords { available })?;

        let round = Self::from_words(word1, word2, rng);
        tracing::debug!(
            "Dealt round from words #{} and #{}: {}",
            index1,
            index2,
            round.scrambled
        );

        Ok(round)
    }

    /// Scramble two known words into a fresh round
    pub fn from_words(word1: &str, word2: &str, rng: &mut impl Rng) -> Self {
        let scrambled = merge_shuffle(word1, word2, rng);
        Self::with_scramble(word1, word2, scrambled)
    }

    fn with_scramble(word1: &str, word2: &str, scrambled: String) -> Self {
        debug_assert!(
            is_subsequence(word1, &scrambled) && is_subsequence(word2, &scrambled),
            "{} is not a merge of {} and {}",
            scrambled,
            word1,
            word2
        );
        Self {
            word1: word1.to_string(),
            word2: word2.to_string(),
            board: Board::from_scrambled(&scrambled),
            scrambled,
            started_at: Utc::now(),
        }
    }

    pub fn place(&mut self, row: TargetRow) -> Result<Tile, GameError> {
        self.board.place(row)
    }

    pub fn undo(&mut self) -> Option<Placement> {
        self.board.undo()
    }

    pub fn is_complete(&self) -> bool {
        self.board.is_complete()
    }

    /// Both words, revealed only once every tile has been placed
    pub fn solution(&self) -> Option<String> {
        self.is_complete()
            .then(|| format!("{} {}", self.word1, self.word2))
    }

    pub fn words(&self) -> (&str, &str) {
        (&self.word1, &self.word2)
    }

    pub fn scrambled(&self) -> &str {
        &self.scrambled
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self, session_id: Uuid) -> RoundSnapshot {
        RoundSnapshot {
            session_id,
            draw_pile: self.board.draw_pile_letters(),
            top_letter: self.board.top().map(|tile| tile.letter),
            word1_row: self.board.row_letters(TargetRow::Word1),
            word2_row: self.board.row_letters(TargetRow::Word2),
            remaining: self.board.remaining(),
            can_undo: self.board.can_undo(),
            complete: self.is_complete(),
            solution: self.solution(),
            started_at: self.started_at,
        }
    }
}
