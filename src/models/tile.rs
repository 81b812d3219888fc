use serde::{Deserialize, Serialize};

/// One letter of the scrambled sequence. `id` is its position in that
/// sequence, so two tiles carrying the same letter stay distinguishable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Tile {
    pub id: usize,
    pub letter: char,
}

/// The two rows the player rebuilds the hidden words in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum TargetRow {
    #[serde(rename = "word1")]
    Word1,
    #[serde(rename = "word2")]
    Word2,
}

/// A tile moved from the draw pile into a target row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub struct Placement {
    pub tile: Tile,
    pub row: TargetRow,
}
