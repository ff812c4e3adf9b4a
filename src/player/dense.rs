use rand::rngs::SmallRng;

use super::Player;
use crate::ai::DensityTargeter;
use crate::board::Board;
use crate::common::ShotResult;

/// Computer player driven by the placement-density targeter.
pub struct DensePlayer {
    targeter: DensityTargeter,
}

impl DensePlayer {
    pub fn new(fleet: &[usize]) -> Self {
        Self {
            targeter: DensityTargeter::new(fleet),
        }
    }

    pub fn targeter(&self) -> &DensityTargeter {
        &self.targeter
    }
}

impl Player for DensePlayer {
    fn name(&self) -> &str {
        "Dense"
    }

    fn initialize(&mut self, opponent: &Board) {
        self.targeter.initialize(opponent);
    }

    fn select_target(&mut self, _rng: &mut SmallRng, opponent: &Board) -> Option<usize> {
        self.targeter.next_shot(opponent)
    }

    fn handle_shot_result(&mut self, opponent: &Board, pos: usize, result: ShotResult) {
        self.targeter.on_shot_result(opponent, pos, result);
    }

    fn reset(&mut self) {
        self.targeter.reset();
    }
}
