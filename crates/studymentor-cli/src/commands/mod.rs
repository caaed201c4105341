pub mod chat;
pub mod config;
pub mod data;
pub mod goal;
pub mod log;
pub mod mentor;
pub mod mode;
pub mod progress;
pub mod roadmap;
pub mod session;
pub mod stats;
pub mod timer;

use std::error::Error;

use serde::Serialize;
use studymentor_core::{AppConfig, Celebration, CoreError, StudyApp};

pub type CmdResult = Result<(), Box<dyn Error>>;

/// Load the configuration and open the on-disk application state.
pub fn open_app() -> Result<StudyApp, Box<dyn Error>> {
    let config = AppConfig::load()?;
    Ok(StudyApp::open(&config)?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_celebration(celebration: &Celebration) -> CmdResult {
    print_json(&celebration.to_event())
}

/// Turn a network failure into an inline notice; other errors propagate.
pub fn soften(err: CoreError, notice: &str) -> CmdResult {
    if err.is_network() {
        tracing::warn!(error = %err, "remote call failed");
        eprintln!("{notice}");
        Ok(())
    } else {
        Err(err.into())
    }
}
