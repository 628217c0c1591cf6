//! lru-replay - replay a SET/GET/DEL/CLEAR script against an LRU cache

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lrucache::{CacheConfig, DEFAULT_CAPACITY};
use lru_replay::Replayer;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Script to replay (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so replies on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = CacheConfig::new(args.capacity);
    let mut replayer = Replayer::new(&config)?;
    info!("Cache capacity: {}", config.capacity);

    let stdout = io::stdout();
    let summary = match &args.input {
        Some(path) => {
            info!("Replaying {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            replayer.replay(BufReader::new(file), stdout.lock())?
        }
        None => {
            info!("Replaying stdin");
            replayer.replay(io::stdin().lock(), stdout.lock())?
        }
    };

    info!(
        "Replay finished: {} commands, {} errors, {} entries cached",
        summary.commands,
        summary.errors,
        replayer.len()
    );

    Ok(())
}
