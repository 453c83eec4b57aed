//! Task CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{AttemptRecord, TaskRequest};

#[derive(Args, Debug)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Run one task through selection, drafting, gating and shipping
    Run {
        /// What the content is about
        #[arg(long)]
        topic: String,
        /// Who the content is for
        #[arg(long)]
        audience: String,
        /// Target workstream (defaults to x_post)
        #[arg(short, long)]
        workstream: Option<String>,
        /// Objective the play optimises for
        #[arg(long, default_value = "subs")]
        objective: String,
        /// Requested tone
        #[arg(long, default_value = "")]
        tone: String,
    },
}

#[derive(Debug, serde::Serialize)]
pub struct TaskRunOutput {
    pub attempt: AttemptRecord,
}

impl CommandOutput for TaskRunOutput {
    fn to_human(&self) -> String {
        let attempt = &self.attempt;
        let mut lines = vec![
            format!("Attempt: {}", attempt.id),
            format!("Workstream: {}", attempt.workstream),
            format!("Play: {}", attempt.chosen_arm_id),
            format!("Decision: {}", attempt.ship_decision),
            format!("Quality gate: {}", attempt.quality_gate.status.as_str()),
            format!("Policy gate: {}", attempt.policy_gate.status.as_str()),
        ];
        if let Some(location) = &attempt.artifact_location {
            lines.push(format!("Artifact: {location}"));
        }
        for issue in attempt.quality_gate.issues.iter().chain(&attempt.policy_gate.issues) {
            lines.push(format!(
                "  [{}] {}: {}",
                issue.severity.as_str(),
                issue.code,
                issue.message
            ));
        }
        lines.join("\n")
    }
}

pub async fn execute(args: TaskArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    match args.command {
        TaskCommands::Run {
            topic,
            audience,
            workstream,
            objective,
            tone,
        } => {
            let mut request = TaskRequest::new(topic, audience).with_tone(tone);
            request.workstream = workstream;
            request.objective = objective;

            let attempt = ctx.orchestrator()?.run_task(request).await?;
            output(&TaskRunOutput { attempt }, json_mode);
        }
    }

    Ok(())
}
