use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use studymentor_core::api::types::{RoadmapRequest, SkillLevel};

use super::{open_app, print_celebration, print_json, soften, CmdResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<Level> for SkillLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => SkillLevel::Beginner,
            Level::Intermediate => SkillLevel::Intermediate,
            Level::Advanced => SkillLevel::Advanced,
        }
    }
}

#[derive(Subcommand)]
pub enum RoadmapAction {
    /// Generate roadmap variants for a learning goal
    Generate {
        /// What you want to learn
        goal: String,
        /// Hours per week
        #[arg(long, default_value = "10")]
        hours: u32,
        /// Current skill level
        #[arg(long, value_enum, default_value = "beginner")]
        level: Level,
        /// Preferred learning style (repeatable)
        #[arg(long = "style")]
        styles: Vec<String>,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<NaiveDate>,
        /// Budget ("free", "low", "medium", "high")
        #[arg(long, default_value = "free")]
        budget: String,
    },
    /// Show the current roadmap
    Show,
    /// Choose a track of the current roadmap
    Select {
        /// Track type, e.g. "balanced"
        track: String,
    },
}

pub async fn run(action: RoadmapAction) -> CmdResult {
    let mut app = open_app()?;

    match action {
        RoadmapAction::Generate {
            goal,
            hours,
            level,
            styles,
            deadline,
            budget,
        } => {
            let request = RoadmapRequest {
                learning_goal: goal,
                time_commitment: hours,
                skill_level: level.into(),
                learning_styles: styles,
                deadline,
                budget,
            };
            match app.generate_roadmap(&request).await {
                Ok(set) => print_json(&set),
                Err(e) => soften(e, "Failed to generate roadmap. Please try again."),
            }
        }
        RoadmapAction::Show => match app.get_roadmap().await {
            Ok(record) => print_json(&record),
            Err(e) => soften(e, "Failed to load roadmap. Please try again."),
        },
        RoadmapAction::Select { track } => match app.select_track(&track).await {
            Ok((ack, celebration)) => {
                if let Some(id) = &ack.progress_id {
                    println!("progress: {id}");
                }
                print_celebration(&celebration)
            }
            Err(e) => soften(e, "Failed to select roadmap. Please try again."),
        },
    }
}
