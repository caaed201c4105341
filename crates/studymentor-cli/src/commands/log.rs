use studymentor_core::CoreError;

use super::{open_app, print_celebration, print_json, soften, CmdResult};

pub async fn run(hours: u32, minutes: u32) -> CmdResult {
    let mut app = open_app()?;
    match app.log_manual_time(hours, minutes).await {
        Ok((progress, celebration)) => {
            if let Some(progress) = progress {
                print_json(&progress)?;
            }
            print_celebration(&celebration)
        }
        Err(CoreError::NoActiveRoadmap) => {
            eprintln!(
                "Recorded {} locally; no roadmap to sync with.",
                studymentor_core::format::duration(u64::from(hours) * 60 + u64::from(minutes))
            );
            Ok(())
        }
        Err(e) => soften(e, "Time recorded locally but could not be synced. Please try again."),
    }
}
