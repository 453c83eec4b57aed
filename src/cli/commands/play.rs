//! Play CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::context::AppContext;
use crate::cli::output::{list_table, output, render_list, CommandOutput};
use crate::domain::models::{Play, Workstream};

#[derive(Args, Debug)]
pub struct PlayArgs {
    #[command(subcommand)]
    pub command: PlayCommands,
}

#[derive(Subcommand, Debug)]
pub enum PlayCommands {
    /// Persist the configured playbook (existing arm statistics are kept)
    Seed,
    /// List plays and their arm statistics
    List {
        /// Only plays of this workstream
        #[arg(short, long)]
        workstream: Option<Workstream>,
    },
    /// Exclude a play from selection
    Deactivate {
        /// Play ID
        id: String,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct PlayOutput {
    pub id: String,
    pub workstream: String,
    pub active: bool,
    pub n: u64,
    pub reward_sum: f64,
    pub mean: f64,
}

impl From<&Play> for PlayOutput {
    fn from(play: &Play) -> Self {
        Self {
            id: play.id.clone(),
            workstream: play.workstream.to_string(),
            active: play.active,
            n: play.arm.n,
            reward_sum: play.arm.reward_sum,
            mean: play.arm.mean(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct PlayListOutput {
    pub plays: Vec<PlayOutput>,
    pub total: usize,
}

impl CommandOutput for PlayListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "workstream", "active", "n", "mean"]);
        for play in &self.plays {
            table.add_row(vec![
                play.id.clone(),
                play.workstream.clone(),
                if play.active { "yes" } else { "no" }.to_string(),
                play.n.to_string(),
                format!("{:.3}", play.mean),
            ]);
        }
        render_list("play", &table, self.total)
    }
}

#[derive(Debug, serde::Serialize)]
pub struct PlayActionOutput {
    pub success: bool,
    pub message: String,
}

impl CommandOutput for PlayActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

pub async fn execute(args: PlayArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let service = ctx.playbook();

    match args.command {
        PlayCommands::Seed => {
            let count = service.seed(&ctx.config.plays).await?;
            output(
                &PlayActionOutput {
                    success: true,
                    message: format!("Seeded {count} play(s)"),
                },
                json_mode,
            );
        }
        PlayCommands::List { workstream } => {
            let plays = service.list(workstream).await?;
            let out = PlayListOutput {
                total: plays.len(),
                plays: plays.iter().map(PlayOutput::from).collect(),
            };
            output(&out, json_mode);
        }
        PlayCommands::Deactivate { id } => {
            service.deactivate(&id).await?;
            output(
                &PlayActionOutput {
                    success: true,
                    message: format!("Play {id} deactivated"),
                },
                json_mode,
            );
        }
    }

    Ok(())
}
