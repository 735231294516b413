//! Battle client binary.
//!
//! Composition root: reads configuration, installs logging, assembles both
//! teams and hands them to the runtime.
//!
//! # Examples
//!
//! ```bash
//! # Two random teams of three, no pacing
//! cargo run -p battle-client -- --team-size 3 --delay-ms 0
//!
//! # Persistent roster with a fixed seed
//! cargo run -p battle-client -- --roster save/roster.json --seed 42
//! ```

use anyhow::Result;
use battle_client::Args;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    battle_client::run(args).await
}
