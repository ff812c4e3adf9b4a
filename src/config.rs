use alloc::vec::Vec;

use crate::board::Board;
use crate::common::BoardError;

/// Widest supported board, bounded by the number of column labels.
pub const MAX_FIELD_WIDTH: usize = 84;
pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;
pub const DEFAULT_FLEET: [usize; 5] = [5, 4, 3, 3, 2];

/// Board dimensions, spacing rule and fleet shared by both sides of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub no_touch: bool,
    pub fleet: Vec<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            no_touch: false,
            fleet: DEFAULT_FLEET.to_vec(),
        }
    }
}

impl GameConfig {
    /// Check that the board can be built and every ship fits on it, sorting
    /// the fleet ascending on success.
    pub fn validate(mut self) -> Result<Self, BoardError> {
        let board = self.new_board()?;
        for &len in &self.fleet {
            board.legal_placements(len)?;
        }
        self.fleet.sort_unstable();
        Ok(self)
    }

    /// Fresh empty board with these dimensions and spacing rule.
    pub fn new_board(&self) -> Result<Board, BoardError> {
        Board::new(self.width, self.height, self.no_touch)
    }

    /// Total number of ship cells in the fleet.
    pub fn total_ship_cells(&self) -> usize {
        self.fleet.iter().sum()
    }
}
