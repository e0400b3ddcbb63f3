use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = commands::Context::open(cli.dataset.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Commands::Lookup { code } => commands::lookup(&ctx, &code),
        Commands::Search { query, limit } => commands::search(&ctx, &query, limit),
        Commands::Validate { code } => commands::validate(&code),
        Commands::Calculate(args) => commands::calculate(ctx, args),
    }
}

// Logs go to stderr so report output on stdout stays machine-readable
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
