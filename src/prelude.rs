//! Commonly used types and utilities for ease of import.

pub use crate::{
    create_player, Board, BoardError, DensityTargeter, GameConfig, Match, MatchEvent, Placement,
    Player, PlayerKind, ShotResult,
};

#[cfg(feature = "std")]
pub use crate::{run_benchmark, ui::render_board, BenchConfig, BenchReport};
