//! Common types for Battleships: board errors and shot results.

use alloc::vec::Vec;

/// Result of a shot fired at a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// Shot hit water.
    Miss,
    /// Shot hit a ship segment without sinking it.
    Hit,
    /// Shot completed a ship, carrying the ship's length.
    Sunk(usize),
}

impl ShotResult {
    /// `true` for both `Hit` and `Sunk`.
    pub fn is_hit(self) -> bool {
        !matches!(self, ShotResult::Miss)
    }

    /// Length of the ship sunk by this shot, if any.
    pub fn sunk_length(self) -> Option<usize> {
        match self {
            ShotResult::Sunk(len) => Some(len),
            _ => None,
        }
    }
}

/// Errors returned by geometry and board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Board width is outside `1..=84` or height is zero.
    FieldTooLarge { width: usize, height: usize },
    /// Ship cannot fit on the board in any orientation.
    ShipTooLong { length: usize, max: usize },
    /// Cells are not a legal straight run, overlap another ship or touch one
    /// while spacing is enforced.
    InvalidPlacement { cells: Vec<usize> },
    /// Position was already shot at.
    AlreadyShot { position: usize },
    /// Random placement ran out of candidates for a ship.
    PlacementExhausted { length: usize },
    /// Position lies outside the board.
    OutOfRange { position: usize, size: usize },
    /// Every ship is already sunk.
    GameOver,
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::FieldTooLarge { width, height } => write!(
                f,
                "Unsupported field size {}x{}, width must be 1..={} and height at least 1",
                width,
                height,
                crate::config::MAX_FIELD_WIDTH
            ),
            BoardError::ShipTooLong { length, max } => write!(
                f,
                "Ship of length {} cannot be placed, only up to {} fits on this board",
                length, max
            ),
            BoardError::InvalidPlacement { cells } => {
                write!(f, "Cannot place ship of length {} at {:?}", cells.len(), cells)
            }
            BoardError::AlreadyShot { position } => {
                write!(f, "Position {} was already shot at", position)
            }
            BoardError::PlacementExhausted { length } => write!(
                f,
                "Placing ship of length {} failed, increase the field size or decrease the number or length of ships",
                length
            ),
            BoardError::OutOfRange { position, size } => {
                write!(f, "Position {} is outside the board of {} cells", position, size)
            }
            BoardError::GameOver => write!(f, "Game is already over"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
