//! Command-line interface for ImpactLab.

mod commands;

use clap::{Parser, Subcommand};

/// ImpactLab - coworking space booking service
#[derive(Parser)]
#[command(name = "impactlab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Create the default admin account and sample rooms if missing
    Seed,

    /// List the room catalog
    #[command(alias = "ls")]
    Rooms,
}

pub use commands::*;
