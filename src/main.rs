#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use seabattle::{init_logging, run_terminal, server, GameEngine, InMemorySessionStore, SessionId};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in this terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Serve the JSON-lines game protocol over TCP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn engine_for(seed: Option<u64>) -> GameEngine {
    match seed {
        Some(s) => {
            log::info!("using fixed seed {} (games are reproducible)", s);
            GameEngine::with_seed(InMemorySessionStore::new(), s)
        }
        None => GameEngine::in_memory(),
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed } => {
            let engine = engine_for(seed);
            let session = SessionId::from("local");
            let stdin = std::io::stdin();
            run_terminal(&engine, &session, stdin.lock(), std::io::stdout())?;
        }
        Commands::Serve { bind, seed } => {
            let engine = Arc::new(engine_for(seed));
            server::run(bind, engine).await?;
        }
    }
    Ok(())
}
