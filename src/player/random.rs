use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use super::Player;
use crate::board::Board;

/// Fires at uniformly random unshot cells.
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn select_target(&mut self, rng: &mut SmallRng, opponent: &Board) -> Option<usize> {
        let open: Vec<usize> = opponent
            .shots()
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_shot())
            .map(|(i, _)| i)
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(open[rng.random_range(0..open.len())])
    }
}
