use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use broadside::{create_player, init_logging, stdin_lines, Match, MatchConfig, PlayerKind, Seat};
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlayerType {
    Human,
    Awful,
    Mediocre,
    Good,
}

impl From<PlayerType> for PlayerKind {
    fn from(t: PlayerType) -> Self {
        match t {
            PlayerType::Human => PlayerKind::Human,
            PlayerType::Awful => PlayerKind::Awful,
            PlayerType::Mediocre => PlayerKind::Mediocre,
            PlayerType::Good => PlayerKind::Good,
        }
    }
}

#[derive(Parser)]
enum Commands {
    /// Play one match on this terminal.
    Play {
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        p1: PlayerType,
        #[arg(long, value_enum, default_value_t = PlayerType::Good)]
        p2: PlayerType,
        #[arg(long, default_value = "Player 1")]
        name1: String,
        #[arg(long, default_value = "Player 2")]
        name2: String,
        #[arg(long, help = "JSON match configuration (defaults to the standard 10x10 fleet)")]
        config: Option<PathBuf>,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Wait for enter after every turn")]
        pause: bool,
    },
    /// Run many silent computer-vs-computer matches and print win counts.
    Bench {
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long, value_enum, default_value_t = PlayerType::Good)]
        p1: PlayerType,
        #[arg(long, value_enum, default_value_t = PlayerType::Mediocre)]
        p2: PlayerType,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<MatchConfig> {
    match path {
        None => Ok(MatchConfig::standard()),
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            MatchConfig::from_json(&text)
                .with_context(|| format!("invalid config {}", path.display()))
        }
    }
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            p1,
            p2,
            name1,
            name2,
            config,
            seed,
            pause,
        } => {
            let config = load_config(config.as_ref())?;
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = make_rng(seed);
            let mut first = create_player(p1.into(), &name1, &config);
            let mut second = create_player(p2.into(), &name2, &config);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            let mut pause_input = stdin_lines();
            let pause = if pause {
                Some(&mut pause_input as &mut dyn io::BufRead)
            } else {
                None
            };
            Match::new(&config).play(first.as_mut(), second.as_mut(), &mut rng, &mut out, pause)?;
            out.flush()?;
        }
        Commands::Bench {
            games,
            p1,
            p2,
            config,
            seed,
        } => {
            let (k1, k2): (PlayerKind, PlayerKind) = (p1.into(), p2.into());
            anyhow::ensure!(
                k1 != PlayerKind::Human && k2 != PlayerKind::Human,
                "bench only runs computer players"
            );
            let config = load_config(config.as_ref())?;
            let mut rng = make_rng(seed);
            let game = Match::new(&config);
            let mut wins = [0usize; 2];
            let mut turns = 0usize;
            for n in 0..games {
                let mut first = create_player(k1, &format!("{} 1", k1), &config);
                let mut second = create_player(k2, &format!("{} 2", k2), &config);
                let outcome = game
                    .play(first.as_mut(), second.as_mut(), &mut rng, &mut io::sink(), None)
                    .with_context(|| format!("bench game {}", n + 1))?;
                turns += outcome.turns;
                match outcome.winner {
                    Seat::First => wins[0] += 1,
                    Seat::Second => wins[1] += 1,
                }
            }
            info!("bench finished {} games", games);
            println!("{} (first):  {} wins", k1, wins[0]);
            println!("{} (second): {} wins", k2, wins[1]);
            if games > 0 {
                println!("average turns: {:.1}", turns as f64 / games as f64);
            }
        }
    }
    Ok(())
}
