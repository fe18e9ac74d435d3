use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::settings::STORE_PATH_ENV;

#[derive(Parser, Debug)]
#[command(author, version, about = "Round-robin pairs tournament organiser")]
pub struct Cli {
    /// Tournament store file (defaults to tournaments.json)
    #[arg(long, global = true, env = STORE_PATH_ENV)]
    pub store: Option<PathBuf>,

    /// Seed for reproducible pairings and groupings
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Tournament to work on
    #[arg(short, long, global = true, env = "TOURNAMENT_NAME")]
    pub tournament: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Create a tournament and make it the working one
    New { name: String },
    /// List stored tournaments
    List,
    /// Delete a tournament
    Delete { name: String },
    /// Manage the roster
    Player {
        #[clap(subcommand)]
        action: PlayerCommand,
    },
    /// Show the roster
    Players,
    /// Form skill-balanced pairs from the roster
    Pair {
        /// Discard recorded scores if needed
        #[arg(long)]
        force: bool,
    },
    /// Enter pairs by hand, e.g. "Ana/Rui, Bia/Caio"
    PairManual {
        list: String,
        #[arg(long)]
        force: bool,
    },
    /// Shuffle the pairs into groups
    Group {
        count: usize,
        #[arg(long)]
        force: bool,
    },
    /// Show every group's matches and scores
    Matches,
    /// Record a score; group and match are 1-based as shown by `matches`.
    /// Pass `_` for a side to keep its current score.
    Score {
        group: usize,
        #[arg(value_name = "MATCH")]
        match_number: usize,
        #[arg(allow_hyphen_values = true)]
        score_a: String,
        #[arg(allow_hyphen_values = true)]
        score_b: String,
    },
    /// Show standings and advancing pairs
    Standings,
    /// Print shell completions
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum PlayerCommand {
    /// Add one player
    Add {
        name: String,
        #[arg(short, long, default_value_t = 5)]
        skill: i64,
        /// Add to the partner roster instead
        #[arg(long)]
        partner: bool,
        #[arg(long)]
        force: bool,
    },
    /// Add a comma-separated list of names at the default skill
    Bulk {
        list: String,
        #[arg(long)]
        partner: bool,
        #[arg(long)]
        force: bool,
    },
    /// Change a player's skill
    Skill {
        name: String,
        skill: i64,
        #[arg(long)]
        force: bool,
    },
    /// Remove a player
    Remove {
        name: String,
        #[arg(long)]
        force: bool,
    },
}
