//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{AnalystArgs, AttemptArgs, PlayArgs, TaskArgs};

#[derive(Parser, Debug)]
#[command(name = "ecole")]
#[command(about = "Ecole - bandit-driven content pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .ecole/
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the playbook
    Play(PlayArgs),

    /// Run content tasks through the pipeline
    Task(TaskArgs),

    /// Inspect recorded attempts
    Attempt(AttemptArgs),

    /// Settle delayed rewards
    Analyst(AnalystArgs),
}
