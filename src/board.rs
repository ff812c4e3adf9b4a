//! Board state: ship placements, shots, sunk detection and game over.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::{BoardError, ShotResult};
use crate::config::MAX_FIELD_WIDTH;
use crate::geometry::{Geometry, Placement};

/// State of a single cell as seen by the shooter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Shot {
    #[default]
    Untouched,
    Hit,
    Miss,
}

impl Shot {
    pub fn is_shot(self) -> bool {
        self != Shot::Untouched
    }
}

/// Serializable snapshot of a board, for reporting finished games.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub width: usize,
    pub height: usize,
    pub no_touch: bool,
    pub occupancy: Vec<bool>,
    pub shots: Vec<Shot>,
    pub placements: Vec<Placement>,
    pub sunk: Vec<bool>,
    pub last_shot_hit: bool,
    /// Length of the ship sunk by the most recent shot, if any.
    pub ship_just_sunk: Option<usize>,
    pub game_over: bool,
    pub forfeited: bool,
}

/// One side's grid: where its ships are and where it has been shot.
#[derive(Clone)]
pub struct Board {
    geometry: Geometry,
    no_touch: bool,
    occupancy: Vec<bool>,
    shots: Vec<Shot>,
    placements: Vec<Placement>,
    sunk: Vec<bool>,
    last_shot_hit: bool,
    just_sunk: Option<usize>,
    game_over: bool,
    forfeited: bool,
}

impl Board {
    /// Create an empty `width` x `height` board. With `no_touch`, ships may
    /// not be orthogonally adjacent.
    pub fn new(width: usize, height: usize, no_touch: bool) -> Result<Self, BoardError> {
        if width == 0 || width > MAX_FIELD_WIDTH || height == 0 {
            return Err(BoardError::FieldTooLarge { width, height });
        }
        let size = width * height;
        Ok(Board {
            geometry: Geometry::new(width, height),
            no_touch,
            occupancy: vec![false; size],
            shots: vec![Shot::Untouched; size],
            placements: Vec::new(),
            sunk: Vec::new(),
            last_shot_hit: false,
            just_sunk: None,
            game_over: false,
            forfeited: false,
        })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn width(&self) -> usize {
        self.geometry.width()
    }

    pub fn height(&self) -> usize {
        self.geometry.height()
    }

    pub fn size(&self) -> usize {
        self.geometry.size()
    }

    pub fn no_touch(&self) -> bool {
        self.no_touch
    }

    /// Ship cells, one flag per position.
    pub fn occupancy(&self) -> &[bool] {
        &self.occupancy
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Sunk flag for each entry of [`placements`](Self::placements).
    pub fn sunk(&self) -> &[bool] {
        &self.sunk
    }

    pub fn last_shot_hit(&self) -> bool {
        self.last_shot_hit
    }

    /// Length of the ship sunk by the most recent shot, if any.
    pub fn ship_just_sunk(&self) -> Option<usize> {
        self.just_sunk
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn forfeited(&self) -> bool {
        self.forfeited
    }

    /// Every legal placement of a ship of `length`, regardless of occupancy.
    pub fn legal_placements(&self, length: usize) -> Result<Arc<[Placement]>, BoardError> {
        self.geometry.placements(length)
    }

    fn spacing_clear(&self, pos: usize) -> bool {
        self.geometry.neighbors(pos).all(|n| !self.occupancy[n])
    }

    /// Place a ship on the given cells. Nothing changes unless every cell is
    /// free, the cells form a legal run and, under no-touch, no neighbour is
    /// occupied.
    pub fn place_ship(&mut self, cells: &[usize]) -> Result<(), BoardError> {
        let ship = Placement::from(cells);
        let invalid = || BoardError::InvalidPlacement {
            cells: ship.cells().to_vec(),
        };
        let legal = match self.legal_placements(ship.len()) {
            Ok(all) => all,
            Err(BoardError::ShipTooLong { .. }) => return Err(invalid()),
            Err(e) => return Err(e),
        };
        if legal.binary_search(&ship).is_err() {
            return Err(invalid());
        }
        if ship.iter().any(|c| self.occupancy[c]) {
            return Err(invalid());
        }
        if self.no_touch && !ship.iter().all(|c| self.spacing_clear(c)) {
            return Err(invalid());
        }

        for c in ship.iter() {
            self.occupancy[c] = true;
        }
        log::trace!("placed {:?}", ship);
        self.placements.push(ship);
        self.sunk.push(false);
        Ok(())
    }

    /// Place several ships, stopping at the first failure.
    pub fn place_ships<'a, I>(&mut self, ships: I) -> Result<(), BoardError>
    where
        I: IntoIterator<Item = &'a [usize]>,
    {
        for cells in ships {
            self.place_ship(cells)?;
        }
        Ok(())
    }

    /// Randomly place one ship per entry of `lengths`. Each ship draws
    /// untried candidates until one fits; if a ship runs out of candidates
    /// every ship placed by this call is removed again.
    pub fn place_random_fleet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        lengths: &[usize],
    ) -> Result<(), BoardError> {
        let placed_before = self.placements.len();
        for &len in lengths {
            if let Err(e) = self.place_random_ship(rng, len) {
                self.remove_ships_from(placed_before);
                return Err(e);
            }
        }
        Ok(())
    }

    fn place_random_ship<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        length: usize,
    ) -> Result<(), BoardError> {
        let mut candidates = match self.legal_placements(length) {
            Ok(all) => all.to_vec(),
            Err(BoardError::InvalidPlacement { .. }) => Vec::new(),
            Err(e) => return Err(e),
        };
        while !candidates.is_empty() {
            let pick = candidates.swap_remove(rng.random_range(0..candidates.len()));
            match self.place_ship(pick.cells()) {
                Ok(()) => return Ok(()),
                Err(BoardError::InvalidPlacement { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        log::debug!("no candidate left for ship of length {}", length);
        Err(BoardError::PlacementExhausted { length })
    }

    fn remove_ships_from(&mut self, index: usize) {
        for ship in self.placements.drain(index..) {
            for c in ship.iter() {
                self.occupancy[c] = false;
            }
        }
        self.sunk.truncate(index);
    }

    /// Fire at `pos`. Each cell can be shot exactly once.
    pub fn shoot(&mut self, pos: usize) -> Result<ShotResult, BoardError> {
        self.geometry.check_position(pos)?;
        if self.game_over {
            return Err(BoardError::GameOver);
        }
        if self.shots[pos].is_shot() {
            return Err(BoardError::AlreadyShot { position: pos });
        }
        self.last_shot_hit = self.occupancy[pos];
        self.shots[pos] = if self.last_shot_hit { Shot::Hit } else { Shot::Miss };
        self.update_sunk();

        Ok(match (self.last_shot_hit, self.just_sunk) {
            (false, _) => ShotResult::Miss,
            (true, None) => ShotResult::Hit,
            (true, Some(len)) => ShotResult::Sunk(len),
        })
    }

    /// Recompute sunk flags after a shot; a miss can never complete a ship.
    fn update_sunk(&mut self) {
        self.just_sunk = None;
        if !self.last_shot_hit {
            return;
        }
        for (ship, sunk) in self.placements.iter().zip(self.sunk.iter_mut()) {
            if !*sunk && ship.iter().all(|c| self.shots[c] == Shot::Hit) {
                *sunk = true;
                self.just_sunk = Some(ship.len());
                log::debug!("sunk {:?}", ship);
            }
        }
        if self.sunk.iter().all(|&s| s) {
            self.game_over = true;
        }
    }

    /// Give up: every ship counts as sunk and the game is over.
    pub fn forfeit(&mut self) {
        self.forfeited = true;
        self.last_shot_hit = true;
        self.sunk.iter_mut().for_each(|s| *s = true);
        self.update_sunk();
    }

    /// Clear ships, shots and flags. Geometry and cached placements stay.
    pub fn reset(&mut self) {
        self.occupancy.iter_mut().for_each(|o| *o = false);
        self.shots.iter_mut().for_each(|s| *s = Shot::Untouched);
        self.placements.clear();
        self.sunk.clear();
        self.last_shot_hit = false;
        self.just_sunk = None;
        self.game_over = false;
        self.forfeited = false;
    }

    /// Counts of (untouched, hit, missed) cells.
    pub fn shot_counts(&self) -> (usize, usize, usize) {
        self.shots.iter().fold((0, 0, 0), |(u, h, m), s| match s {
            Shot::Untouched => (u + 1, h, m),
            Shot::Hit => (u, h + 1, m),
            Shot::Miss => (u, h, m + 1),
        })
    }

    /// Immutable snapshot of the full board state.
    pub fn state(&self) -> BoardState {
        BoardState::from(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  geometry: {:?},\n  placements: {:?},\n  sunk: {:?},\n  game_over: {},\n  forfeited: {}\n}}",
            self.geometry, self.placements, self.sunk, self.game_over, self.forfeited
        )
    }
}

impl From<&Board> for BoardState {
    fn from(b: &Board) -> Self {
        BoardState {
            width: b.width(),
            height: b.height(),
            no_touch: b.no_touch,
            occupancy: b.occupancy.clone(),
            shots: b.shots.clone(),
            placements: b.placements.clone(),
            sunk: b.sunk.clone(),
            last_shot_hit: b.last_shot_hit,
            ship_just_sunk: b.just_sunk,
            game_over: b.game_over,
            forfeited: b.forfeited,
        }
    }
}
