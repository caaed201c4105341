use clap::Subcommand;
use studymentor_core::GoalLedger;

use super::{open_app, print_celebration, print_json, CmdResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal for today
    Add {
        /// What to accomplish
        text: String,
        /// Planned minutes
        #[arg(long, short, default_value = "30")]
        minutes: u32,
    },
    /// List today's goals
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a goal done (or not done with --undo)
    Toggle {
        /// Goal number as shown by `goal list`
        position: usize,
        /// Mark as not done
        #[arg(long)]
        undo: bool,
    },
    /// Remove a goal
    Remove {
        /// Goal number as shown by `goal list`
        position: usize,
    },
}

/// `goal list` numbers from 1.
fn index(position: usize) -> Result<usize, Box<dyn std::error::Error>> {
    position
        .checked_sub(1)
        .ok_or_else(|| "goal numbers start at 1".into())
}

fn print_ledger(goals: &GoalLedger) {
    if goals.is_empty() {
        println!("No goals set for today.");
        return;
    }
    for (i, goal) in goals.goals().iter().enumerate() {
        let mark = if goal.completed { "x" } else { " " };
        println!(
            "{:>2}. [{mark}] {} ({})",
            i + 1,
            goal.text,
            studymentor_core::format::duration(u64::from(goal.minutes_planned))
        );
    }
    println!(
        "{}/{} completed ({:.0}%)",
        goals.completed_count(),
        goals.total(),
        goals.completion_ratio() * 100.0
    );
}

pub fn run(action: GoalAction) -> CmdResult {
    let mut app = open_app()?;

    match action {
        GoalAction::Add { text, minutes } => {
            let goal = app.add_goal(&text, minutes)?;
            print_json(goal)?;
        }
        GoalAction::List { json } => {
            if json {
                print_json(app.goals())?;
            } else {
                print_ledger(app.goals());
            }
        }
        GoalAction::Toggle { position, undo } => {
            let celebration = app.toggle_goal(index(position)?, !undo)?;
            print_ledger(app.goals());
            if let Some(c) = celebration {
                print_celebration(&c)?;
            }
        }
        GoalAction::Remove { position } => {
            let removed = app.remove_goal(index(position)?)?;
            println!("removed: {}", removed.text);
        }
    }
    Ok(())
}
