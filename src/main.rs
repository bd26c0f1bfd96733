//! Binary entrypoint for the Pathrover CLI.
//!
//! Commands:
//! - `play` - steer the rover from the keyboard (`W A S D`, `Q` to quit)
//! - `random [--seed <n>] [--max-moves <n>]` - let the random walker drive
//! - `init` - write a starter `pathrover.toml`
//!
//! See the library crate docs for module-level details: `pathrover::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};

use pathrover::config::Config;
use pathrover::console::{ConsoleOptions, ConsoleWorld, GameEnd, InputSource, Keyboard, RandomWalker};
use pathrover::pathbot::{HttpPathbot, Session};

#[derive(Parser)]
#[command(name = "pathrover")]
#[command(about = "Console client for the Pathbot maze game")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "pathrover.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play from the keyboard
    Play {
        /// Override the maze server base URL
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Let a random walker play
    Random {
        /// Seed for a reproducible walk
        #[arg(long)]
        seed: Option<u64>,
        /// Quit after this many moves (0 = until the exit)
        #[arg(long)]
        max_moves: Option<u32>,
        /// Override the maze server base URL
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Write a default configuration file
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_logging(&Config::default(), cli.verbose);
            Config::create_default(&cli.config).await?;
            println!("Configuration file created at {}", cli.config);
            Ok(())
        }
        Commands::Play { base_url } => {
            let config = prepare(&cli.config, cli.verbose, base_url).await?;
            report(run(&config, Keyboard::stdin(), false).await)
        }
        Commands::Random {
            seed,
            max_moves,
            base_url,
        } => {
            let config = prepare(&cli.config, cli.verbose, base_url).await?;
            let walker = RandomWalker::new(
                seed.or(config.solver.seed),
                max_moves.unwrap_or(config.solver.max_moves),
            );
            report(run(&config, walker, true).await)
        }
    }
}

/// Load config, start logging and apply CLI overrides.
async fn prepare(path: &str, verbose: u8, base_url: Option<String>) -> Result<Config> {
    let mut config = Config::load_or_default(path).await?;
    init_logging(&config, verbose);
    info!("Starting Pathrover v{}", env!("CARGO_PKG_VERSION"));

    if let Some(url) = base_url {
        config.pathbot.base_url = url;
    }
    // Animation only makes sense on a terminal.
    if !atty::is(atty::Stream::Stdout) {
        config.console.typing_effect = false;
    }
    Ok(config)
}

fn report(outcome: Result<GameEnd>) -> Result<()> {
    match outcome {
        Ok(end) => {
            info!("Game over: {:?}", end);
            Ok(())
        }
        Err(e) => {
            error!("Session aborted: {:#}", e);
            Err(e)
        }
    }
}

async fn run<I: InputSource>(config: &Config, input: I, echo_moves: bool) -> Result<GameEnd> {
    info!("Using maze server {}", config.pathbot.base_url);
    let session = Session::new(HttpPathbot::new(&config.pathbot));
    let options = ConsoleOptions::from_config(&config.console, echo_moves);
    let mut game = ConsoleWorld::new(session, input, std::io::stdout(), options);
    let end = game.start().await?;
    info!(
        "{} moves, {} server requests",
        game.explorer().moves(),
        game.session().network_requests()
    );
    Ok(end)
}

fn init_logging(config: &Config, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let level = match verbosity {
        0 => config.logging.level_filter(),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);
    // stdout belongs to the game; logs go to stderr or the log file
    builder.target(env_logger::Target::Stderr);
    if let Some(ref file) = config.logging.file {
        match std::fs::OpenOptions::new().create(true).append(true).open(file) {
            Ok(f) => {
                builder.target(env_logger::Target::Pipe(Box::new(f)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {} (logging to stderr)", file, e),
        }
    }
    builder.format(|fmt, record| {
        let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
    });
    let _ = builder.try_init();
}
