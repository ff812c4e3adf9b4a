//! Match loop: two players, two boards, alternating shots.

use alloc::boxed::Box;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::common::{BoardError, ShotResult};
use crate::config::GameConfig;
use crate::geometry::Placement;
use crate::player::Player;

/// Something that happened during play, reported to the match observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    /// Player `shooter` fired at `position` on the other side's board.
    Shot {
        shooter: usize,
        position: usize,
        result: ShotResult,
    },
    /// Player `side` gave up.
    Forfeit { side: usize },
}

/// Outcome of a finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSummary {
    /// Index of the winning player, `0` or `1`.
    pub winner: usize,
    /// Number of rounds started, counting the winner's last one.
    pub turns: usize,
    /// Hits scored by each player.
    pub hits: [usize; 2],
    /// Misses by each player.
    pub misses: [usize; 2],
    /// Whether each player forfeited.
    pub forfeited: [bool; 2],
    /// Each player's own fleet.
    pub fleets: [Vec<Placement>; 2],
}

struct Side {
    player: Box<dyn Player>,
    board: Board,
}

/// A match between two players on boards built from one [`GameConfig`].
pub struct Match {
    config: GameConfig,
    sides: [Side; 2],
    rng: SmallRng,
    turns: usize,
}

impl Match {
    pub fn new(
        config: GameConfig,
        first: Box<dyn Player>,
        second: Box<dyn Player>,
        seed: u64,
    ) -> Result<Self, BoardError> {
        let config = config.validate()?;
        let sides = [
            Side {
                player: first,
                board: config.new_board()?,
            },
            Side {
                player: second,
                board: config.new_board()?,
            },
        ];
        Ok(Self {
            config,
            sides,
            rng: SmallRng::seed_from_u64(seed),
            turns: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Board owned by player `side`.
    pub fn board(&self, side: usize) -> &Board {
        &self.sides[side].board
    }

    pub fn player(&self, side: usize) -> &dyn Player {
        self.sides[side].player.as_ref()
    }

    /// Place both fleets and let each player study the opposing board.
    /// With `random_fleets` the players' own placement logic is bypassed.
    pub fn setup(&mut self, random_fleets: bool) -> Result<(), BoardError> {
        let fleet = self.config.fleet.clone();
        for side in &mut self.sides {
            if random_fleets {
                side.board.place_random_fleet(&mut self.rng, &fleet)?;
            } else {
                side.player.place_ships(&mut self.rng, &mut side.board, &fleet)?;
            }
        }
        let [a, b] = &mut self.sides;
        a.player.initialize(&b.board);
        b.player.initialize(&a.board);
        Ok(())
    }

    /// Let `shooter` take one shot at the other side. Returns `true` once the
    /// target board is over.
    fn take_turn<F>(&mut self, shooter: usize, observer: &mut F) -> bool
    where
        F: FnMut(&Match, MatchEvent),
    {
        let [a, b] = &mut self.sides;
        let (own, other) = if shooter == 0 { (a, b) } else { (b, a) };
        let target = &mut other.board;
        if target.game_over() {
            return true;
        }
        let Some(pos) = own.player.select_target(&mut self.rng, target) else {
            own.board.forfeit();
            observer(self, MatchEvent::Forfeit { side: shooter });
            return true;
        };
        match target.shoot(pos) {
            Ok(result) => {
                own.player.handle_shot_result(target, pos, result);
                let over = target.game_over();
                observer(
                    self,
                    MatchEvent::Shot {
                        shooter,
                        position: pos,
                        result,
                    },
                );
                over
            }
            Err(e) => {
                log::warn!("{} chose an invalid target: {}", own.player.name(), e);
                own.board.forfeit();
                observer(self, MatchEvent::Forfeit { side: shooter });
                true
            }
        }
    }

    /// Alternate turns, first player first, until one fleet is gone.
    pub fn play<F>(&mut self, mut observer: F) -> MatchSummary
    where
        F: FnMut(&Match, MatchEvent),
    {
        self.turns = 0;
        loop {
            self.turns += 1;
            if self.take_turn(0, &mut observer) || self.take_turn(1, &mut observer) {
                break;
            }
        }
        self.summary()
    }

    /// Summary of the current state. The winner is the side whose board is
    /// still standing.
    pub fn summary(&self) -> MatchSummary {
        let lost = |side: usize| self.sides[side].board.game_over();
        let winner = if lost(0) && !lost(1) { 1 } else { 0 };
        // player `i` fires at board `1 - i`
        let counts = |side: usize| self.sides[1 - side].board.shot_counts();
        let (_, h0, m0) = counts(0);
        let (_, h1, m1) = counts(1);
        MatchSummary {
            winner,
            turns: self.turns,
            hits: [h0, h1],
            misses: [m0, m1],
            forfeited: [self.sides[0].board.forfeited(), self.sides[1].board.forfeited()],
            fleets: [
                self.sides[0].board.placements().to_vec(),
                self.sides[1].board.placements().to_vec(),
            ],
        }
    }

    /// Clear boards and player state for the next episode.
    pub fn reset(&mut self) {
        for side in &mut self.sides {
            side.board.reset();
            side.player.reset();
        }
        self.turns = 0;
    }
}
