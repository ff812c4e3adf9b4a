//! Player trait and implementations
//!
//! This module defines the Player trait and provides concrete implementations:
//! - RandomPlayer: fires at uniformly random unshot cells
//! - HunterPlayer: checkerboard hunting, then probes around hits
//! - DensePlayer: placement-density targeting
//! - HumanPlayer: interactive command-line player

use alloc::boxed::Box;
use rand::rngs::SmallRng;

use crate::board::Board;
use crate::common::{BoardError, ShotResult};

/// Interface implemented by different player types.
///
/// A Player is responsible for:
/// - Placing its fleet on its own board
/// - Selecting targets on the opponent board
/// - Handling feedback from its shots
pub trait Player: Send {
    /// Display name.
    fn name(&self) -> &str;

    /// Prepare for a match against `opponent`.
    fn initialize(&mut self, _opponent: &Board) {}

    /// Place the whole fleet onto the player's own board.
    fn place_ships(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &[usize],
    ) -> Result<(), BoardError> {
        board.place_random_fleet(rng, fleet)
    }

    /// Choose the next cell to fire at. `None` forfeits the game.
    fn select_target(&mut self, rng: &mut SmallRng, opponent: &Board) -> Option<usize>;

    /// Inform the player of the result of its last shot.
    fn handle_shot_result(&mut self, _opponent: &Board, _pos: usize, _result: ShotResult) {}

    /// Forget per-match state before the next game.
    fn reset(&mut self) {}
}

/// Selectable player strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum, serde::Serialize, serde::Deserialize))]
pub enum PlayerKind {
    Random,
    Hunter,
    Dense,
    #[cfg(feature = "std")]
    Human,
}

impl PlayerKind {
    pub fn label(self) -> &'static str {
        match self {
            PlayerKind::Random => "Random",
            PlayerKind::Hunter => "Hunter",
            PlayerKind::Dense => "Dense",
            #[cfg(feature = "std")]
            PlayerKind::Human => "Human",
        }
    }
}

/// Build a player of `kind` for a match with the given fleet.
pub fn create_player(kind: PlayerKind, fleet: &[usize]) -> Box<dyn Player> {
    match kind {
        PlayerKind::Random => Box::new(RandomPlayer::new()),
        PlayerKind::Hunter => Box::new(HunterPlayer::new()),
        PlayerKind::Dense => Box::new(DensePlayer::new(fleet)),
        #[cfg(feature = "std")]
        PlayerKind::Human => Box::new(HumanPlayer::new("Human", fleet)),
    }
}

pub mod dense;
pub mod hunter;
pub mod random;
pub use dense::DensePlayer;
pub use hunter::HunterPlayer;
pub use random::RandomPlayer;

#[cfg(feature = "std")]
pub mod human;
#[cfg(feature = "std")]
pub use human::HumanPlayer;
