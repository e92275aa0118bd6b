use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use dinosaur_facts::data::loader;
use dinosaur_facts::{Dinosaur, dinosaur_description, dinosaurs_alive_mya, longest_dinosaur};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Dinosaur data file (.json or .csv). Uses the bundled sample when omitted.
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the longest dinosaur and its length in feet.
    Longest,
    /// Describe the dinosaur with the given ID.
    Describe { id: String },
    /// List the dinosaurs alive a number of millions of years ago.
    Alive {
        #[arg(allow_negative_numbers = true)]
        mya: f64,
        /// Field to report for each match instead of the ID.
        #[arg(short, long)]
        key: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn load(cli: &Cli) -> Result<Vec<Dinosaur>> {
    match &cli.data {
        Some(path) => loader::load_file(path)
            .with_context(|| format!("loading dinosaurs from {}", path.display())),
        None => {
            log::info!("no data file given, using bundled sample");
            loader::bundled()
        }
    }
}

/// Run one command against `dinosaurs`, writing its result to `out`.
pub fn run(command: &Command, dinosaurs: &[Dinosaur], out: &mut impl Write) -> Result<()> {
    match command {
        Command::Longest => {
            let longest = longest_dinosaur(dinosaurs);
            writeln!(out, "{}", serde_json::to_string(&longest)?)?;
        }
        Command::Describe { id } => {
            writeln!(out, "{}", dinosaur_description(dinosaurs, id))?;
        }
        Command::Alive { mya, key } => {
            let alive = dinosaurs_alive_mya(dinosaurs, *mya, key.as_deref());
            writeln!(out, "{}", serde_json::to_string(&alive)?)?;
        }
    }
    Ok(())
}
