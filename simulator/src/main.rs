use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use edgeline_simulator::{compile_output, run_audit, simulate, Config};
use edgeline_types::casino::{GameKey, GameParams};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file (log level, tolerance, RTP overrides, simulation defaults).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the bet array for one game as JSON.
    Compile {
        #[arg(short, long)]
        game: GameKey,
        /// Parameters as JSON, e.g. '{"type":"threshold","threshold":50}'.
        #[arg(short, long)]
        params: String,
    },
    /// Audit the parameter grid of every game against its target RTP.
    Audit {
        /// Restrict the audit to one game.
        #[arg(short, long)]
        game: Option<GameKey>,
    },
    /// Play seeded rounds against a bet array and report the empirical return.
    Simulate {
        #[arg(short, long)]
        game: GameKey,
        #[arg(short, long)]
        params: String,
        #[arg(short, long)]
        rounds: Option<usize>,
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn parse_params(raw: &str) -> anyhow::Result<GameParams> {
    serde_json::from_str(raw).with_context(|| format!("invalid params: {raw}"))
}

fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config
    let config: Config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config file {}", path.display()))?;
            serde_yaml::from_str(&raw).context("could not parse config file")?
        }
        None => Config::default(),
    };
    let config = config.validate().context("invalid config")?;

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Compile { game, params } => {
            let params = parse_params(&params)?;
            let output = compile_output(&config.registry, &config.validator, game, &params)
                .with_context(|| format!("failed to compile {game}"))?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Audit { game } => {
            let (cases, summary) = run_audit(&config.registry, &config.validator, game);
            for case in &cases {
                match &case.result {
                    Ok(report) => println!("{report}"),
                    Err(err) => println!("{:<16} {:?} ERROR {err}", case.game.as_str(), case.params),
                }
            }
            info!(
                cases = summary.cases,
                within_tolerance = summary.within_tolerance,
                drifted = summary.drifted,
                errors = summary.errors,
                "audit complete"
            );
            println!("{}", serde_json::to_string(&summary)?);
            if summary.errors > 0 {
                bail!("{} audit cases failed to compile", summary.errors);
            }
        }
        Command::Simulate {
            game,
            params,
            rounds,
            seed,
        } => {
            let params = parse_params(&params)?;
            let rounds = rounds.unwrap_or(config.rounds);
            let seed = seed.unwrap_or(config.seed);
            let simulation = simulate(&config.registry, game, &params, rounds, seed)
                .with_context(|| format!("failed to simulate {game}"))?;
            println!("{}", serde_json::to_string_pretty(&simulation)?);
        }
    }

    Ok(())
}
