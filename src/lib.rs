#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod ai;
#[cfg(feature = "std")]
pub mod bench;
mod board;
mod common;
mod config;
pub mod coord;
mod game;
pub mod geometry;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
pub mod player;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::{DensityTargeter, PendingSink};
#[cfg(feature = "std")]
pub use bench::{run_benchmark, BenchConfig, BenchReport, PlayerStats};
pub use board::*;
pub use common::*;
pub use config::*;
pub use coord::{parse_label, render_label, CoordError};
pub use game::*;
pub use geometry::{Geometry, Placement};
#[cfg(feature = "std")]
pub use logging::{init_logging, init_with_filter, LogFilter};
pub use player::{create_player, DensePlayer, HunterPlayer, Player, PlayerKind, RandomPlayer};
#[cfg(feature = "std")]
pub use player::HumanPlayer;
