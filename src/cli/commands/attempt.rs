//! Attempt CLI commands.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use uuid::Uuid;

use crate::cli::context::AppContext;
use crate::cli::output::{format_optional, list_table, output, render_list, CommandOutput};
use crate::domain::models::{AttemptRecord, Workstream};
use crate::domain::ports::{AttemptFilter, AttemptRepository};

#[derive(Args, Debug)]
pub struct AttemptArgs {
    #[command(subcommand)]
    pub command: AttemptCommands,
}

#[derive(Subcommand, Debug)]
pub enum AttemptCommands {
    /// List attempts, newest first
    List {
        /// Only attempts still waiting for a reward
        #[arg(short, long)]
        unsettled: bool,
        /// Only attempts of this workstream
        #[arg(short, long)]
        workstream: Option<Workstream>,
        /// Maximum number of attempts to show
        #[arg(short, long)]
        limit: Option<i64>,
    },
    /// Show one attempt in full
    Show {
        /// Attempt ID
        id: String,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct AttemptListOutput {
    pub attempts: Vec<AttemptRecord>,
    pub total: usize,
}

impl CommandOutput for AttemptListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "workstream", "play", "decision", "reward"]);
        for attempt in &self.attempts {
            table.add_row(vec![
                attempt.id.to_string()[..8].to_string(),
                attempt.workstream.to_string(),
                attempt.chosen_arm_id.clone(),
                attempt.ship_decision.to_string(),
                format_optional(attempt.reward, 3),
            ]);
        }
        render_list("attempt", &table, self.total)
    }
}

#[derive(Debug, serde::Serialize)]
pub struct AttemptDetailOutput {
    pub attempt: AttemptRecord,
}

impl CommandOutput for AttemptDetailOutput {
    fn to_human(&self) -> String {
        let a = &self.attempt;
        let mut lines = vec![
            format!("Attempt: {}", a.id),
            format!("Created: {}", a.created_at.to_rfc3339()),
            format!("Workstream: {}", a.workstream),
            format!("Play: {}", a.chosen_arm_id),
            format!("Topic: {} ({})", a.context.topic, a.context.audience),
            format!("Decision: {}", a.ship_decision),
            format!("Propensity: {}", format_optional(a.propensity, 3)),
            format!("Draft hash: {}", a.draft_hash),
        ];
        if let Some(location) = &a.artifact_location {
            lines.push(format!("Artifact: {location}"));
        }
        lines.push(if a.settled {
            format!("Reward: {} (settled)", format_optional(a.reward, 4))
        } else {
            "Reward: pending".to_string()
        });

        for (name, gate) in [("Quality", &a.quality_gate), ("Policy", &a.policy_gate)] {
            lines.push(format!("\n{name} gate: {}", gate.status.as_str()));
            for (key, score) in &gate.scores {
                lines.push(format!("  {key} = {score}"));
            }
            for issue in &gate.issues {
                lines.push(format!("  [{}] {}: {}", issue.severity.as_str(), issue.code, issue.message));
            }
            for fix in &gate.auto_fixes_applied {
                lines.push(format!("  auto-fix: {fix}"));
            }
        }
        lines.join("\n")
    }
}

pub async fn execute(args: AttemptArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let repo = ctx.attempts();

    match args.command {
        AttemptCommands::List {
            unsettled,
            workstream,
            limit,
        } => {
            let filter = AttemptFilter {
                workstream,
                settled: unsettled.then_some(false),
                limit,
            };
            let attempts = repo.list(filter).await?;
            let out = AttemptListOutput {
                total: attempts.len(),
                attempts,
            };
            output(&out, json_mode);
        }
        AttemptCommands::Show { id } => {
            let id = Uuid::parse_str(&id).with_context(|| format!("Invalid attempt id: {id}"))?;
            let attempt = repo
                .get(id)
                .await?
                .ok_or_else(|| anyhow!("Attempt not found: {id}"))?;
            output(&AttemptDetailOutput { attempt }, json_mode);
        }
    }

    Ok(())
}
