// Density-based targeting against an opponent board.
//
// Hunting counts, for every cell, how many placements of the remaining ships
// could still cover it. Once hits are found, targeting only scores placements
// through those hits. Sinks are attributed to concrete placements so that
// their cells stop attracting fire; ambiguous sinks wait in a queue until the
// hits around them admit exactly one explanation.

use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;

use crate::board::{Board, Shot};
use crate::common::ShotResult;
use crate::geometry::Placement;

/// A sink whose placement could not be pinned down yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSink {
    /// Cell whose hit completed the ship.
    pub trigger: usize,
    pub length: usize,
}

/// Probability-density targeter, one instance per player.
#[derive(Debug, Clone)]
pub struct DensityTargeter {
    fleet: Vec<usize>,
    remaining: Vec<usize>,
    confirmed_hits: BTreeSet<usize>,
    pending: Vec<PendingSink>,
    density: Vec<u32>,
    /// Cells already accounted for in `density`.
    seen: Vec<bool>,
}

impl DensityTargeter {
    /// Targeter hunting a fleet of the given ship lengths.
    pub fn new(fleet: &[usize]) -> Self {
        Self {
            fleet: fleet.to_vec(),
            remaining: fleet.to_vec(),
            confirmed_hits: BTreeSet::new(),
            pending: Vec::new(),
            density: Vec::new(),
            seen: Vec::new(),
        }
    }

    /// Lengths of ships not yet attributed to a sink.
    pub fn remaining_ships(&self) -> &[usize] {
        &self.remaining
    }

    /// Hits not yet attributed to an identified sunk ship.
    pub fn confirmed_hits(&self) -> &BTreeSet<usize> {
        &self.confirmed_hits
    }

    pub fn pending(&self) -> &[PendingSink] {
        &self.pending
    }

    /// Current hunting density, one score per cell.
    pub fn density(&self) -> &[u32] {
        &self.density
    }

    /// Build the hunting density for the opponent board.
    pub fn initialize(&mut self, opponent: &Board) {
        self.rebuild_density(opponent);
    }

    /// Forget everything learned about the previous opponent fleet.
    pub fn reset(&mut self) {
        self.remaining = self.fleet.clone();
        self.confirmed_hits.clear();
        self.pending.clear();
        self.density.clear();
        self.seen.clear();
    }

    /// Next cell to fire at, or `None` once every cell has been shot.
    pub fn next_shot(&mut self, opponent: &Board) -> Option<usize> {
        if !self.confirmed_hits.is_empty() {
            let scores = self.target_scores(opponent);
            if let Some(pos) = argmax_unshot(&scores, opponent.shots()) {
                if scores[pos] > 0 {
                    return Some(pos);
                }
            }
            log::warn!(
                "no placement explains hits {:?}, falling back to hunting",
                self.confirmed_hits
            );
        }
        self.hunt(opponent)
    }

    /// Record the outcome of a shot at `pos` on `opponent`.
    pub fn on_shot_result(&mut self, opponent: &Board, pos: usize, result: ShotResult) {
        if result.is_hit() {
            self.confirmed_hits.insert(pos);
        }
        if let Some(length) = result.sunk_length() {
            self.attribute_sink(opponent, pos, length);
        }
        if !self.pending.is_empty() {
            self.resolve_pending(opponent);
        }
    }

    fn hunt(&mut self, opponent: &Board) -> Option<usize> {
        if self.density.len() != opponent.size() {
            self.rebuild_density(opponent);
        } else {
            self.update_density(opponent);
        }
        argmax_unshot(&self.density, opponent.shots())
    }

    /// Count, per cell, the unshot placements of every remaining ship.
    fn rebuild_density(&mut self, opponent: &Board) {
        let shots = opponent.shots();
        let mut density = vec![0u32; opponent.size()];
        for &len in &self.remaining {
            let Ok(all) = opponent.legal_placements(len) else {
                continue;
            };
            for p in all.iter() {
                if p.iter().all(|c| !shots[c].is_shot()) {
                    p.iter().for_each(|c| density[c] += 1);
                }
            }
        }
        self.density = density;
        self.seen = shots.iter().map(|s| s.is_shot()).collect();
    }

    /// Remove the contribution of placements invalidated by cells shot since
    /// the density was last brought up to date.
    fn update_density(&mut self, opponent: &Board) {
        let geometry = opponent.geometry();
        for (pos, shot) in opponent.shots().iter().enumerate() {
            if !shot.is_shot() || self.seen[pos] {
                continue;
            }
            for &len in &self.remaining {
                let Ok(through) = geometry.placements_through(len, pos) else {
                    continue;
                };
                for p in through {
                    if p.iter().all(|c| !self.seen[c]) {
                        for c in p.iter() {
                            self.density[c] = self.density[c].saturating_sub(1);
                        }
                    }
                }
            }
            self.seen[pos] = true;
        }
    }

    /// Score cells around confirmed hits. A placement counts if it covers at
    /// least one confirmed hit, every shot cell it covers is a confirmed hit,
    /// and it still has an unshot cell. Each of its unshot cells gains the
    /// number of confirmed hits it covers.
    pub fn target_scores(&self, opponent: &Board) -> Vec<u32> {
        let shots = opponent.shots();
        let mut scores = vec![0u32; opponent.size()];
        for &len in &self.remaining {
            let Ok(all) = opponent.legal_placements(len) else {
                continue;
            };
            for p in all.iter() {
                let mut tracked = 0u32;
                let mut blocked = false;
                for c in p.iter() {
                    if self.confirmed_hits.contains(&c) {
                        tracked += 1;
                    } else if shots[c].is_shot() {
                        blocked = true;
                        break;
                    }
                }
                if blocked || tracked == 0 || tracked as usize == p.len() {
                    continue;
                }
                for c in p.iter() {
                    if !shots[c].is_shot() {
                        scores[c] += tracked;
                    }
                }
            }
        }
        scores
    }

    /// Placements of `length` through `trigger` made only of confirmed hits.
    fn sink_candidates(&self, opponent: &Board, trigger: usize, length: usize) -> Vec<Placement> {
        let Ok(through) = opponent.geometry().placements_through(length, trigger) else {
            return Vec::new();
        };
        through
            .into_iter()
            .filter(|p| p.iter().all(|c| self.confirmed_hits.contains(&c)))
            .collect()
    }

    fn attribute_sink(&mut self, opponent: &Board, trigger: usize, length: usize) {
        let mut candidates = self.sink_candidates(opponent, trigger, length);
        match candidates.len() {
            0 => {
                log::warn!(
                    "sink of length {} at {} matches no confirmed hits",
                    length,
                    trigger
                );
                self.remove_remaining(length);
                self.rebuild_density(opponent);
            }
            1 => {
                if let Some(ship) = candidates.pop() {
                    log::debug!("attributed sink to {:?}", ship);
                    self.commit(&ship);
                }
                self.rebuild_density(opponent);
            }
            n => {
                log::debug!(
                    "sink of length {} at {} is ambiguous between {} placements",
                    length,
                    trigger,
                    n
                );
                self.pending.push(PendingSink { trigger, length });
            }
        }
    }

    /// Commit the queue only if exactly one mutually exclusive choice of
    /// placements explains every pending sink at once.
    fn resolve_pending(&mut self, opponent: &Board) {
        let options: Vec<Vec<Placement>> = self
            .pending
            .iter()
            .map(|s| self.sink_candidates(opponent, s.trigger, s.length))
            .collect();

        let mut chosen = Vec::with_capacity(options.len());
        let mut solution = None;
        let solutions = count_exclusive(&options, &mut chosen, &mut solution, 2);
        if solutions != 1 {
            log::trace!(
                "{} pending sinks still ambiguous ({} combinations)",
                self.pending.len(),
                solutions
            );
            return;
        }
        if let Some(ships) = solution {
            for ship in &ships {
                log::debug!("attributed queued sink to {:?}", ship);
                self.commit(ship);
            }
            self.pending.clear();
            self.rebuild_density(opponent);
        }
    }

    fn commit(&mut self, ship: &Placement) {
        for c in ship.iter() {
            self.confirmed_hits.remove(&c);
        }
        self.remove_remaining(ship.len());
    }

    fn remove_remaining(&mut self, length: usize) {
        if let Some(i) = self.remaining.iter().position(|&l| l == length) {
            self.remaining.remove(i);
        }
    }
}

/// Count choices of one placement per option list with no shared cell,
/// stopping once `limit` is reached. The first choice found is kept.
fn count_exclusive(
    options: &[Vec<Placement>],
    chosen: &mut Vec<Placement>,
    first: &mut Option<Vec<Placement>>,
    limit: usize,
) -> usize {
    let Some((head, rest)) = options.split_first() else {
        if first.is_none() {
            *first = Some(chosen.clone());
        }
        return 1;
    };
    let mut found = 0;
    for p in head {
        if chosen.iter().any(|c| c.overlaps(p)) {
            continue;
        }
        chosen.push(p.clone());
        found += count_exclusive(rest, chosen, first, limit - found);
        chosen.pop();
        if found >= limit {
            break;
        }
    }
    found
}

/// First unshot cell with the highest score.
fn argmax_unshot(scores: &[u32], shots: &[Shot]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (pos, &score) in scores.iter().enumerate() {
        if shots[pos].is_shot() {
            continue;
        }
        if best.map_or(true, |b| score > scores[b]) {
            best = Some(pos);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    #[test]
    fn incremental_density_matches_rebuild() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = Board::new(10, 10, false).unwrap();
        board.place_random_fleet(&mut rng, &[5, 4, 3, 3, 2]).unwrap();
        let mut incremental = DensityTargeter::new(&[5, 4, 3, 3, 2]);
        incremental.initialize(&board);

        for _ in 0..30 {
            let pos = rng.random_range(0..board.size());
            if board.shots()[pos].is_shot() {
                continue;
            }
            board.shoot(pos).unwrap();
            // two shots between updates exercise the batch path
            if rng.random_bool(0.5) {
                continue;
            }
            incremental.update_density(&board);
            let mut fresh = DensityTargeter::new(&[5, 4, 3, 3, 2]);
            fresh.initialize(&board);
            assert_eq!(incremental.density(), fresh.density());
        }
    }

    #[test]
    fn queue_commits_only_unique_joint_explanation() {
        let board = Board::new(10, 10, false).unwrap();
        let mut t = DensityTargeter::new(&[2, 2, 3]);
        t.confirmed_hits.extend([21, 22, 23, 24]);
        t.pending.push(PendingSink { trigger: 22, length: 2 });
        t.pending.push(PendingSink { trigger: 23, length: 2 });

        t.resolve_pending(&board);
        assert!(t.pending.is_empty());
        assert!(t.confirmed_hits.is_empty());
        assert_eq!(t.remaining_ships(), &[3]);
    }

    #[test]
    fn queue_keeps_ambiguous_square() {
        let board = Board::new(10, 10, false).unwrap();
        let mut t = DensityTargeter::new(&[2, 2]);
        t.confirmed_hits.extend([11, 12, 21, 22]);
        t.pending.push(PendingSink { trigger: 22, length: 2 });
        t.pending.push(PendingSink { trigger: 11, length: 2 });

        t.resolve_pending(&board);
        assert_eq!(t.pending.len(), 2);
        assert_eq!(t.confirmed_hits.len(), 4);
        assert_eq!(t.remaining_ships(), &[2, 2]);
    }

    #[test]
    fn argmax_skips_shot_cells_and_prefers_first() {
        let shots = [Shot::Hit, Shot::Untouched, Shot::Untouched, Shot::Miss];
        assert_eq!(argmax_unshot(&[9, 3, 3, 9], &shots), Some(1));
        assert_eq!(argmax_unshot(&[0, 0, 0, 0], &[Shot::Miss; 4]), None);
    }
}
