//! Request and response bodies of the study-mentor HTTP API.
//!
//! Field names follow the server's snake_case JSON. Response types default
//! missing fields so a server adding or dropping optional data does not
//! break decoding.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::mode::Mode;

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Preferences submitted to generate roadmap variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapRequest {
    pub learning_goal: String,
    /// Hours per week.
    pub time_commitment: u32,
    pub skill_level: SkillLevel,
    pub learning_styles: Vec<String>,
    pub deadline: Option<NaiveDate>,
    pub budget: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub name: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// One candidate track (intensive, balanced, relaxed, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapVariant {
    pub title: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub hours_per_week: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phases: Vec<RoadmapPhase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapSet {
    pub roadmap_id: String,
    /// Keyed by track type.
    pub roadmaps: BTreeMap<String, RoadmapVariant>,
}

/// Stored roadmap as returned by `GET /api/roadmap/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapRecord {
    pub id: String,
    #[serde(default)]
    pub roadmaps: BTreeMap<String, RoadmapVariant>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub selected_track: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectTrackRequest<'a> {
    pub track_type: &'a str,
}

/// Generic `{ "status": ... }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ack {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub progress_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub roadmap_id: String,
    pub track: Option<String>,
    pub completion_percentage: f64,
    pub current_phase: u32,
    pub streak: u32,
    pub total_time_spent: u64,
    pub last_study_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressUpdate {
    pub roadmap_id: String,
    pub task_id: String,
    pub completed: bool,
    /// Minutes.
    pub time_spent: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressUpdateReply {
    pub status: String,
    #[serde(default)]
    pub progress: Option<Progress>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalAdjustment {
    pub roadmap_id: String,
    pub new_time_commitment: u32,
    pub new_deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyTechnique {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TechniqueList {
    pub techniques: Vec<StudyTechnique>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roadmap_request_wire_shape() {
        let req = RoadmapRequest {
            learning_goal: "Rust".into(),
            time_commitment: 10,
            skill_level: SkillLevel::Beginner,
            learning_styles: vec!["visual".into()],
            deadline: NaiveDate::from_ymd_opt(2026, 12, 1),
            budget: "free".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["skill_level"], "beginner");
        assert_eq!(json["deadline"], "2026-12-01");
        assert_eq!(json["time_commitment"], 10);
    }

    #[test]
    fn progress_accepts_integer_percentages_and_gaps() {
        let p: Progress =
            serde_json::from_str(r#"{"roadmap_id":"r1","completion_percentage":35,"streak":2}"#)
                .unwrap();
        assert_eq!(p.completion_percentage, 35.0);
        assert_eq!(p.streak, 2);
        assert_eq!(p.total_time_spent, 0);
    }
}
