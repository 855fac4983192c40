//! prosaic - hedges machine-sounding prose without breaking its meaning
//!
//! Usage:
//!   prosaic rewrite draft.txt --style academic --seed 42
//!   prosaic rewrite --hedging 0.3 --stats < draft.txt
//!   prosaic inspect draft.txt
//!   prosaic --help               Show all commands

use anyhow::Result;
use clap::Parser;

use prosaic::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr so piped stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("prosaic=info".parse()?),
        )
        .init();

    cli::execute(&cli)
}
