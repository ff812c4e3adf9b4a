use battleships::{create_player, GameConfig, Match, PlayerKind};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <placement-seed> <match-seed>", args[0]);
        std::process::exit(1);
    }
    let placement_seed: u64 = args[1].parse()?;
    let match_seed: u64 = args[2].parse()?;

    let config = GameConfig::default();
    let fleet = config.fleet.clone();
    let mut game = Match::new(
        config,
        create_player(PlayerKind::Dense, &fleet),
        create_player(PlayerKind::Hunter, &fleet),
        placement_seed ^ match_seed.rotate_left(32),
    )
    .map_err(|e| anyhow::anyhow!(e))?;
    game.setup(true).map_err(|e| anyhow::anyhow!(e))?;
    let summary = game.play(|_, _| {});

    let player = |side: usize| {
        json!({
            "name": game.player(side).name(),
            "hits": summary.hits[side],
            "misses": summary.misses[side],
            "forfeited": summary.forfeited[side],
        })
    };
    let result = json!({
        "player1": player(0),
        "player2": player(1),
        "turns": summary.turns,
        "winner": if summary.winner == 0 { "player1" } else { "player2" },
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
