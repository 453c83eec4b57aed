//! Analyst CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput};
use crate::services::SettlementReport;

#[derive(Args, Debug)]
pub struct AnalystArgs {
    #[command(subcommand)]
    pub command: AnalystCommands,
}

#[derive(Subcommand, Debug)]
pub enum AnalystCommands {
    /// Settle every pending attempt and update arm statistics
    Settle,
}

#[derive(Debug, serde::Serialize)]
pub struct SettleOutput {
    #[serde(flatten)]
    pub report: SettlementReport,
}

impl CommandOutput for SettleOutput {
    fn to_human(&self) -> String {
        let r = &self.report;
        format!(
            "Examined {} attempt(s): {} settled, {} skipped, {} failed",
            r.examined, r.settled, r.skipped, r.failed
        )
    }
}

pub async fn execute(args: AnalystArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    match args.command {
        AnalystCommands::Settle => {
            let report = ctx.analyst().process().await?;
            output(&SettleOutput { report }, json_mode);
        }
    }

    Ok(())
}
