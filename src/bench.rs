#![cfg(feature = "std")]

//! Bulk simulation of computer-vs-computer matches.
//!
//! Each worker owns its own [`Match`] and sends finished-game summaries back
//! over a channel; only the aggregator sees all of them.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::mpsc;

use crate::config::GameConfig;
use crate::game::{Match, MatchSummary};
use crate::geometry::Placement;
use crate::player::{create_player, PlayerKind};

/// What to simulate and how to split the work.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub game: GameConfig,
    pub players: [PlayerKind; 2],
    pub episodes: usize,
    pub workers: usize,
    pub seed: u64,
}

/// Aggregated statistics for one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStats {
    pub name: String,
    pub wins: usize,
    pub mean_shots: f64,
    pub mean_hits: f64,
    pub mean_misses: f64,
    pub forfeits: usize,
}

/// Aggregated statistics for a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub config: GameConfig,
    pub episodes: usize,
    pub workers: usize,
    pub players: [PlayerStats; 2],
    pub shortest_game: usize,
    pub longest_game: usize,
    /// Fleets of the player that was shot at in the shortest games.
    pub shortest_fleets: Vec<Vec<Placement>>,
    pub longest_fleets: Vec<Vec<Placement>>,
    pub elapsed: Duration,
    pub per_game: Duration,
}

/// Collects summaries as they arrive from the workers.
#[derive(Debug, Default)]
struct Aggregate {
    episodes: usize,
    wins: [usize; 2],
    hits: [usize; 2],
    misses: [usize; 2],
    forfeits: [usize; 2],
    shortest: Option<(usize, Vec<Vec<Placement>>)>,
    longest: Option<(usize, Vec<Vec<Placement>>)>,
}

impl Aggregate {
    fn add(&mut self, summary: MatchSummary) {
        self.episodes += 1;
        self.wins[summary.winner] += 1;
        for side in 0..2 {
            self.hits[side] += summary.hits[side];
            self.misses[side] += summary.misses[side];
            self.forfeits[side] += summary.forfeited[side] as usize;
        }
        // the first player's shooting record is the one being benchmarked
        let fleet = summary.fleets[1].clone();
        track(&mut self.shortest, summary.turns, fleet.clone(), |new, old| new < old);
        track(&mut self.longest, summary.turns, fleet, |new, old| new > old);
    }

    fn player_stats(&self, side: usize, kind: PlayerKind) -> PlayerStats {
        let n = self.episodes.max(1) as f64;
        PlayerStats {
            name: kind.label().to_string(),
            wins: self.wins[side],
            mean_shots: (self.hits[side] + self.misses[side]) as f64 / n,
            mean_hits: self.hits[side] as f64 / n,
            mean_misses: self.misses[side] as f64 / n,
            forfeits: self.forfeits[side],
        }
    }
}

fn track(
    slot: &mut Option<(usize, Vec<Vec<Placement>>)>,
    turns: usize,
    fleet: Vec<Placement>,
    better: impl Fn(usize, usize) -> bool,
) {
    match slot {
        Some((best, fleets)) if *best == turns => fleets.push(fleet),
        Some((best, _)) if !better(turns, *best) => {}
        _ => *slot = Some((turns, vec![fleet])),
    }
}

/// Play `episodes` matches on one worker, sending each summary to `tx`.
fn run_worker(
    config: BenchConfig,
    episodes: usize,
    seed: u64,
    tx: mpsc::UnboundedSender<MatchSummary>,
) -> anyhow::Result<()> {
    let fleet = config.game.fleet.clone();
    let mut game = Match::new(
        config.game,
        create_player(config.players[0], &fleet),
        create_player(config.players[1], &fleet),
        seed,
    )
    .map_err(|e| anyhow::anyhow!(e))?;
    for _ in 0..episodes {
        game.setup(true).map_err(|e| anyhow::anyhow!(e))?;
        let summary = game.play(|_, _| {});
        if tx.send(summary).is_err() {
            break;
        }
        game.reset();
    }
    Ok(())
}

/// Mean wall time per game; zero episodes count as one.
fn per_game(elapsed: Duration, episodes: usize) -> Duration {
    Duration::from_secs_f64(elapsed.as_secs_f64() / episodes.max(1) as f64)
}

/// Run the benchmark across `workers` blocking tasks and aggregate results.
pub async fn run_benchmark(config: BenchConfig) -> anyhow::Result<BenchReport> {
    if matches!(config.players, [PlayerKind::Human, _] | [_, PlayerKind::Human]) {
        anyhow::bail!("benchmarks only support computer players");
    }
    let game = config.game.clone().validate().map_err(|e| anyhow::anyhow!(e))?;
    let workers = config.workers.clamp(1, config.episodes.max(1));
    let start = Instant::now();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut handles = Vec::with_capacity(workers);
    for worker in 0..workers {
        // spread the remainder over the first workers
        let episodes = config.episodes / workers + usize::from(worker < config.episodes % workers);
        let seed = config.seed.wrapping_add(worker as u64);
        let cfg = BenchConfig {
            game: game.clone(),
            ..config.clone()
        };
        let tx = tx.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            run_worker(cfg, episodes, seed, tx)
        }));
    }
    drop(tx);

    let mut aggregate = Aggregate::default();
    while let Some(summary) = rx.recv().await {
        aggregate.add(summary);
    }
    for handle in handles {
        handle.await??;
    }
    let elapsed = start.elapsed();
    log::info!(
        "simulated {} episodes on {} workers in {:?}",
        aggregate.episodes,
        workers,
        elapsed
    );

    let per_game = per_game(elapsed, aggregate.episodes);
    let (shortest_game, shortest_fleets) = aggregate.shortest.take().unwrap_or_default();
    let (longest_game, longest_fleets) = aggregate.longest.take().unwrap_or_default();
    Ok(BenchReport {
        config: game,
        episodes: aggregate.episodes,
        workers,
        players: [
            aggregate.player_stats(0, config.players[0]),
            aggregate.player_stats(1, config.players[1]),
        ],
        shortest_game,
        longest_game,
        shortest_fleets,
        longest_fleets,
        elapsed,
        per_game,
    })
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The algorithm was run for {} episodes.", self.episodes)?;
        writeln!(f, "Compute time was {:.5} seconds.", self.elapsed.as_secs_f64())?;
        writeln!(
            f,
            "Computing took {:.3} μs per game on {} worker(s).",
            self.per_game.as_secs_f64() * 1_000_000.0,
            self.workers
        )?;
        for p in &self.players {
            let share = p.wins as f64 / self.episodes.max(1) as f64;
            writeln!(f, "\nStats {}:", p.name)?;
            writeln!(f, "    Mean shots: {:.3}", p.mean_shots)?;
            writeln!(f, "    Mean hits: {:.3}", p.mean_hits)?;
            writeln!(f, "    Mean misses: {:.3}", p.mean_misses)?;
            writeln!(f, "    Wins: {}", p.wins)?;
            writeln!(f, "    Win distribution: {:.4}", share)?;
            writeln!(f, "    Forfeits: {}", p.forfeits)?;
        }
        writeln!(f, "\nShortest game: {}", self.shortest_game)?;
        write!(f, "Longest game: {}", self.longest_game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_game_divides_elapsed_time() {
        assert_eq!(per_game(Duration::from_secs(1), 0), Duration::from_secs(1));
        assert_eq!(per_game(Duration::from_secs(3), 4), Duration::from_millis(750));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn per_game_handles_huge_episode_counts() {
        // 5e9 episodes would wrap to 705_032_704 as a u32 divisor
        let t = per_game(Duration::from_secs(10), 5_000_000_000);
        assert!(t >= Duration::from_nanos(1) && t <= Duration::from_nanos(2), "{:?}", t);
    }
}
