use crate::models::{Placement, TargetRow, Tile};

use super::GameError;

/// Where every tile of a round currently sits.
///
/// The draw pile is a stack whose top is the last element. Each tile lives in
/// exactly one of the pile and the two rows; `history` records placements so
/// the latest one can be reversed.
#[derive(Debug, Clone, Default)]
pub struct Board {
    draw_pile: Vec<Tile>,
    word1: Vec<Tile>,
    word2: Vec<Tile>,
    history: Vec<Placement>,
}

impl Board {
    /// Build a board whose draw pile pops `scrambled` in forward order
    pub fn from_scrambled(scrambled: &str) -> Self {
        let tiles: Vec<Tile> = scrambled
            .chars()
            .enumerate()
            .map(|(id, letter)| Tile { id, letter })
            .collect();

        Self {
            draw_pile: tiles.into_iter().rev().collect(),
            ..Self::default()
        }
    }

    /// Move the top tile of the draw pile onto the end of `row`
    pub fn place(&mut self, row: TargetRow) -> Result<Tile, GameError> {
        let tile = self.draw_pile.pop().ok_or(GameError::EmptyDrawPile)?;
        self.row_mut(row).push(tile);
        self.history.push(Placement { tile, row });
        Ok(tile)
    }

    /// Return the most recently placed tile to the draw pile.
    ///
    /// Does nothing and returns `None` when there is no placement to undo.
    pub fn undo(&mut self) -> Option<Placement> {
        let placement = self.history.pop()?;
        let returned = self.row_mut(placement.row).pop();
        debug_assert_eq!(returned, Some(placement.tile));
        self.draw_pile.push(placement.tile);
        Some(placement)
    }

    pub fn top(&self) -> Option<&Tile> {
        self.draw_pile.last()
    }

    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn is_complete(&self) -> bool {
        self.draw_pile.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn row(&self, row: TargetRow) -> &[Tile] {
        match row {
            TargetRow::Word1 => &self.word1,
            TargetRow::Word2 => &self.word2,
        }
    }

    /// Letters on the draw pile, top first
    pub fn draw_pile_letters(&self) -> String {
        self.draw_pile.iter().rev().map(|tile| tile.letter).collect()
    }

    pub fn row_letters(&self, row: TargetRow) -> String {
        self.row(row).iter().map(|tile| tile.letter).collect()
    }

    fn row_mut(&mut self, row: TargetRow) -> &mut Vec<Tile> {
        match row {
            TargetRow::Word1 => &mut self.word1,
            TargetRow::Word2 => &mut self.word2,
        }
    }
}
