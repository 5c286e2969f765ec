//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the DIRS assessment engine.

use clap::{Parser, Subcommand};

use crate::types::Pillar;

/// dirs-engine - Digital Intelligence Readiness Score
///
/// Answer the 25-question DIRS self-assessment, score it, and track progress
/// against your baseline. All data stays in a local data directory.
#[derive(Parser, Debug)]
#[command(name = "dirs-engine")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, env = "DIRS_CONFIG", global = true)]
    pub config: Option<String>,

    /// Data directory (overrides the configured one)
    #[arg(long, env = "DIRS_DATA_DIR", global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the assessment questions
    Questions {
        /// Only show one pillar
        #[arg(short, long, value_parser = parse_pillar)]
        pillar: Option<Pillar>,
    },

    /// Answer one question on the 1-5 agreement scale
    Answer {
        /// Pillar, e.g. cyber-safety or critical-thinking
        #[arg(value_parser = parse_pillar)]
        pillar: Pillar,

        /// Question number within the pillar (1-5)
        question: usize,

        /// 1 strongly disagree .. 5 strongly agree
        value: i32,
    },

    /// Set optional basic information (an empty value clears a field)
    Info {
        #[arg(long)]
        first_name: Option<String>,

        /// One of: "Under 13", "13-18", "18-25", "25+"
        #[arg(long)]
        age_range: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Show how many questions are answered per pillar
    Status,

    /// Score the completed assessment and store the results
    Submit {
        /// Print the stored results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the latest results
    Results {
        #[arg(long)]
        json: bool,
    },

    /// Show previous results, newest first
    History {
        #[arg(long)]
        json: bool,
    },

    /// Score the current answers as a progress checkpoint
    Checkpoint {
        /// Checkpoint label, e.g. "After Module 1"
        label: String,
    },

    /// Show baseline vs latest scores and next actions
    Dashboard {
        #[arg(long)]
        json: bool,

        /// Fill missing checkpoints with simulated demo data
        #[arg(long)]
        demo: bool,
    },

    /// Onboarding ("help me choose") preferences
    Onboard {
        #[command(subcommand)]
        subcommand: OnboardSubcommand,
    },

    /// Clear the in-progress answers
    Reset {
        /// Clear every stored record, including results and progress
        #[arg(long)]
        all: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Display version and build information
    Version,
}

/// Onboarding subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum OnboardSubcommand {
    /// Save onboarding choices
    Save {
        /// Area to improve, e.g. "AI Literacy" or "I'm not sure"
        #[arg(long)]
        focus: String,

        /// e.g. "Student (13–18)"
        #[arg(long)]
        role: String,

        /// e.g. "10 minutes/day"
        #[arg(long)]
        commitment: String,

        /// Follow-up chat answer as id=value (repeatable)
        #[arg(long = "chat", value_parser = parse_key_value)]
        chat: Vec<(String, String)>,
    },

    /// Show the saved onboarding record
    Show {
        #[arg(long)]
        json: bool,
    },

    /// List the accepted onboarding options
    Options,
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the effective configuration
    Show,

    /// Create a configuration file with default values
    Init {
        /// Where to write the file (default ~/.dirs-engine/config.toml)
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate,
}

fn parse_pillar(s: &str) -> Result<Pillar, String> {
    s.parse().map_err(|e: crate::error::Error| e.to_string())
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected id=value, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("missing id in '{}'", s));
    }
    Ok((key.trim().to_string(), value.trim().to_string()))
}
