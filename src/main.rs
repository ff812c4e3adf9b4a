#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleships::{
    create_player, init_logging, render_label, run_benchmark, ui::render_board, BenchConfig,
    GameConfig, Match, MatchEvent, PlayerKind, ShotResult, DEFAULT_FLEET, DEFAULT_HEIGHT,
    DEFAULT_WIDTH,
};

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct FieldArgs {
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,
    #[arg(long, help = "Ships may not touch each other orthogonally")]
    no_touch: bool,
    #[arg(long, value_delimiter = ',', help = "Ship lengths, e.g. --fleet 5,4,3,3,2")]
    fleet: Option<Vec<usize>>,
}

#[cfg(feature = "std")]
impl FieldArgs {
    fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            no_touch: self.no_touch,
            fleet: self.fleet.clone().unwrap_or_else(|| DEFAULT_FLEET.to_vec()),
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play a single match, printing every shot.
    Play {
        #[command(flatten)]
        field: FieldArgs,
        #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
        p1: PlayerKind,
        #[arg(long, value_enum, default_value_t = PlayerKind::Dense)]
        p2: PlayerKind,
        #[arg(long, help = "Let players place their own fleets instead of random placement")]
        manual: bool,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Simulate many computer-vs-computer matches and print statistics.
    Bench {
        #[command(flatten)]
        field: FieldArgs,
        #[arg(long, value_enum, default_value_t = PlayerKind::Dense)]
        p1: PlayerKind,
        #[arg(long, value_enum, default_value_t = PlayerKind::Hunter)]
        p2: PlayerKind,
        #[arg(long, default_value_t = 1000)]
        episodes: usize,
        #[arg(long, help = "Worker count, defaults to the number of CPUs")]
        workers: Option<usize>,
        #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },
}

#[cfg(feature = "std")]
fn seed_or_random(seed: Option<u64>) -> u64 {
    use rand::Rng;
    seed.unwrap_or_else(|| rand::rng().random())
}

#[cfg(feature = "std")]
fn play(config: GameConfig, kinds: [PlayerKind; 2], manual: bool, seed: u64) -> anyhow::Result<()> {
    let fleet = config.fleet.clone();
    let mut game = Match::new(
        config,
        create_player(kinds[0], &fleet),
        create_player(kinds[1], &fleet),
        seed,
    )
    .map_err(|e| anyhow::anyhow!(e))?;
    game.setup(!manual).map_err(|e| anyhow::anyhow!(e))?;

    let summary = game.play(|game, event| match event {
        MatchEvent::Shot {
            shooter,
            position,
            result,
        } => {
            let target = game.board(1 - shooter);
            let label = render_label(position, target.width());
            let name = game.player(shooter).name();
            match result {
                ShotResult::Miss => println!("{} fires at {}: it's a miss!", name, label),
                ShotResult::Hit => println!("{} fires at {}: it's a hit!", name, label),
                ShotResult::Sunk(len) => println!(
                    "{} fires at {}: ship of length {} has been sunk!",
                    name, label, len
                ),
            }
            if kinds[shooter] != PlayerKind::Human && kinds[1 - shooter] != PlayerKind::Human {
                print!("{}", render_board(target, false));
            }
        }
        MatchEvent::Forfeit { side } => println!("{} forfeits.", game.player(side).name()),
    });

    let winner = game.player(summary.winner).name().to_string();
    println!("\n{} won after {} turns!", winner, summary.turns);
    for side in 0..2 {
        println!("\n{}, this was your board:", game.player(side).name());
        print!("{}", render_board(game.board(side), true));
    }
    Ok(())
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            field,
            p1,
            p2,
            manual,
            seed,
        } => {
            let seed = seed_or_random(seed);
            log::info!("Using seed {} (game is reproducible with --seed)", seed);
            // stdin prompts block, keep them off the async workers
            let config = field.config();
            tokio::task::spawn_blocking(move || play(config, [p1, p2], manual, seed)).await??;
        }
        Commands::Bench {
            field,
            p1,
            p2,
            episodes,
            workers,
            seed,
            json,
        } => {
            let workers = workers.unwrap_or_else(|| {
                std::thread::available_parallelism().map_or(1, |n| n.get())
            });
            let report = run_benchmark(BenchConfig {
                game: field.config(),
                players: [p1, p2],
                episodes,
                workers,
                seed: seed_or_random(seed),
            })
            .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }
    }
    Ok(())
}
