use serde::Serialize;

use super::{open_app, print_json, CmdResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView {
    date: String,
    sessions_completed: u32,
    total_minutes: u64,
    total_time: String,
    goals_completed: usize,
    goals_total: usize,
}

pub fn run() -> CmdResult {
    let app = open_app()?;
    let stats = app.stats();

    print_json(&StatsView {
        date: app.today().to_string(),
        sessions_completed: stats.sessions_completed(),
        total_minutes: stats.total_minutes(),
        total_time: stats.total_time_display(),
        goals_completed: app.goals().completed_count(),
        goals_total: app.goals().total(),
    })
}
