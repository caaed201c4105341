use chrono::NaiveDate;
use clap::Subcommand;

use super::{open_app, print_celebration, print_json, soften, CmdResult};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Show progress on the current roadmap
    Show,
    /// Mark a roadmap task done (or not done with --undo)
    Task {
        task_id: String,
        #[arg(long)]
        undo: bool,
    },
    /// Change weekly hours and deadline
    Adjust {
        /// New hours per week
        #[arg(long)]
        hours: u32,
        /// New target date (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
}

pub async fn run(action: ProgressAction) -> CmdResult {
    let app = open_app()?;

    match action {
        ProgressAction::Show => match app.load_progress().await {
            Ok(progress) => print_json(&progress),
            Err(e) => soften(e, "Failed to load progress. Please try again."),
        },
        ProgressAction::Task { task_id, undo } => {
            match app.complete_task(&task_id, !undo).await {
                Ok((progress, celebration)) => {
                    if let Some(progress) = progress {
                        print_json(&progress)?;
                    }
                    if let Some(c) = celebration {
                        print_celebration(&c)?;
                    }
                    Ok(())
                }
                Err(e) => soften(e, "Failed to update task. Please try again."),
            }
        }
        ProgressAction::Adjust { hours, deadline } => {
            match app.adjust_goals(hours, deadline).await {
                Ok((_, celebration)) => print_celebration(&celebration),
                Err(e) => soften(e, "Failed to adjust goals. Please try again."),
            }
        }
    }
}
