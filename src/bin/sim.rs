use broadside::{create_player, init_logging, Match, MatchConfig, PlayerKind};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if !(2..=4).contains(&args.len()) {
        eprintln!("Usage: {} <seed> [p1-kind] [p2-kind]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let kind1: PlayerKind = args.get(2).map_or(Ok(PlayerKind::Good), |s| s.parse())?;
    let kind2: PlayerKind = args.get(3).map_or(Ok(PlayerKind::Mediocre), |s| s.parse())?;
    if kind1 == PlayerKind::Human || kind2 == PlayerKind::Human {
        anyhow::bail!("sim only runs computer players");
    }

    let config = MatchConfig::standard();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut p1 = create_player(kind1, "player1", &config);
    let mut p2 = create_player(kind2, "player2", &config);

    let outcome = Match::new(&config).play(
        p1.as_mut(),
        p2.as_mut(),
        &mut rng,
        &mut std::io::sink(),
        None,
    )?;

    let result = json!({
        "player1": {"kind": kind1.to_string()},
        "player2": {"kind": kind2.to_string()},
        "winner": outcome.winner_name,
        "seat": outcome.winner,
        "turns": outcome.turns,
        "seed": seed,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
