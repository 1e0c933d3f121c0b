//! Flbuild CLI - declarative header generation for C libraries

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("flbuild=debug")
    } else {
        EnvFilter::new("flbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Gen(args) => commands::gen::execute(args),
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
