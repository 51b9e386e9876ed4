//! Morphset CLI
//!
//! Inspect the built-in demo schemas, print default instances and run the
//! collection reconciler from the command line.

use clap::{Parser, Subcommand};
use morphset_core::logging_facility::{self, Profile};

mod commands;
mod demo;

#[derive(Debug, Parser)]
#[command(name = "morphset")]
#[command(about = "Morphset - schema-driven settings variants", long_about = None)]
struct Cli {
    /// Enable logging to stderr with the given profile (dev, prod)
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the concrete shape of every kind of each demo schema
    Shapes(commands::shapes::ShapesArgs),
    /// Print a default-constructed instance of a demo schema
    Defaults(commands::defaults::DefaultsArgs),
    /// Reconcile one sequence into another and report the edits
    Reconcile(commands::reconcile::ReconcileArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log_profile {
        logging_facility::init(profile);
    }

    let result = match cli.command {
        Commands::Shapes(args) => commands::shapes::execute(args),
        Commands::Defaults(args) => commands::defaults::execute(args),
        Commands::Reconcile(args) => commands::reconcile::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
