//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Parley - diplomatic negotiation for turn-based strategy sessions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the parties, holdings and stances of a session
    Inspect {
        /// Path to the session JSON document
        #[arg(short, long)]
        session: PathBuf,
    },

    /// Validate an offer document against a session
    Validate {
        /// Path to the session JSON document
        #[arg(short, long)]
        session: PathBuf,

        /// Path to the offer JSON document
        #[arg(short, long)]
        offer: PathBuf,
    },

    /// Accept an offer and apply its items to the session
    Apply {
        /// Path to the session JSON document
        #[arg(short, long)]
        session: PathBuf,

        /// Path to the offer JSON document
        #[arg(short, long)]
        offer: PathBuf,

        /// Where to write the updated session (defaults to in-place)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
    },

    /// Query the stance between two parties
    Stance {
        /// Path to the session JSON document
        #[arg(short, long)]
        session: PathBuf,

        /// First party id
        first: String,

        /// Second party id
        second: String,
    },
}
