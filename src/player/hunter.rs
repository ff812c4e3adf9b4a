use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use super::Player;
use crate::board::Board;
use crate::common::ShotResult;

/// Hunts on a checkerboard and probes the neighbours of every hit.
pub struct HunterPlayer {
    parity: Vec<usize>,
    to_shoot: VecDeque<usize>,
    ready: bool,
}

impl HunterPlayer {
    pub fn new() -> Self {
        Self {
            parity: Vec::new(),
            to_shoot: VecDeque::new(),
            ready: false,
        }
    }

    /// Cells whose row and column share parity, so every ship of length two
    /// or more covers at least one of them.
    fn parity_cells(opponent: &Board) -> Vec<usize> {
        let geometry = opponent.geometry();
        (0..opponent.size())
            .filter(|&pos| {
                let (row, col) = geometry.row_col(pos);
                (row + col) % 2 == 0
            })
            .collect()
    }
}

impl Default for HunterPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for HunterPlayer {
    fn name(&self) -> &str {
        "Hunter"
    }

    fn initialize(&mut self, opponent: &Board) {
        self.parity = Self::parity_cells(opponent);
        self.to_shoot.clear();
        self.ready = true;
    }

    fn select_target(&mut self, rng: &mut SmallRng, opponent: &Board) -> Option<usize> {
        if !self.ready {
            self.initialize(opponent);
        }
        let shots = opponent.shots();
        while let Some(pos) = self.to_shoot.pop_front() {
            if !shots[pos].is_shot() {
                return Some(pos);
            }
        }
        self.parity.retain(|&p| !shots[p].is_shot());
        if !self.parity.is_empty() {
            let i = rng.random_range(0..self.parity.len());
            return Some(self.parity.swap_remove(i));
        }
        let open: Vec<usize> = (0..shots.len()).filter(|&p| !shots[p].is_shot()).collect();
        if open.is_empty() {
            return None;
        }
        Some(open[rng.random_range(0..open.len())])
    }

    fn handle_shot_result(&mut self, opponent: &Board, pos: usize, result: ShotResult) {
        if !result.is_hit() {
            return;
        }
        let shots = opponent.shots();
        for n in opponent.geometry().neighbors(pos) {
            if !shots[n].is_shot() && !self.to_shoot.contains(&n) {
                self.to_shoot.push_back(n);
            }
        }
    }

    fn reset(&mut self) {
        self.parity.clear();
        self.to_shoot.clear();
        self.ready = false;
    }
}
