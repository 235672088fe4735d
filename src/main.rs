//! Command-line interface for beanmock
//!
//! # Usage Examples
//!
//! ## Generate
//! ```bash
//! # One Customer graph as compact JSON
//! beanmock generate --schema beans.yaml --type Customer
//!
//! # Reproducible output for a self-referencing type
//! beanmock generate --schema beans.yaml --type Node \
//!   --seed 42 --enable-circle --pretty
//!
//! # Containers and generic beans
//! beanmock generate --schema beans.yaml --type "list<Page<Customer>>" --count 10
//! ```
//!
//! ## Check
//! ```bash
//! beanmock check --schema beans.yaml
//! ```
//!
//! Cycles in the generated graph are printed as `{"$ref": "<Type>"}`.
//! Set `RUST_LOG=debug` to trace how each type is dispatched.

use beanmock::{run_check, run_generate, CheckArgs, GenerateArgs};
use clap::{Parser, Subcommand};
use std::io::Write;

#[derive(Parser)]
#[command(name = "beanmock")]
#[command(about = "Generate random object graphs from a bean schema")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate values of a type and print them as JSON
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Validate a schema file
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Generate { args } => run_generate(&args, &mut out)?,
        Commands::Check { args } => run_check(&args, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
