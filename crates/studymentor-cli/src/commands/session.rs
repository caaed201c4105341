use std::io::Write;
use std::sync::{Arc, Mutex};

use clap::Subcommand;
use studymentor_core::driver::lock;
use studymentor_core::format;
use studymentor_core::{Driver, Event, IntervalTicker, SharedApp};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::unbounded_channel;

use super::{open_app, print_celebration, print_json, soften, CmdResult};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Run the stopwatch until Enter or Ctrl-C, then log the time
    Run {
        /// Record locally only; do not report to the roadmap
        #[arg(long)]
        no_sync: bool,
    },
}

pub async fn run(action: SessionAction) -> CmdResult {
    match action {
        SessionAction::Run { no_sync } => run_session(no_sync).await,
    }
}

async fn run_session(no_sync: bool) -> CmdResult {
    let app: SharedApp = Arc::new(Mutex::new(open_app()?));
    let (tx, mut rx) = unbounded_channel();
    let mut driver = Driver::new(
        Arc::clone(&app),
        IntervalTicker::every_second(),
        IntervalTicker::every_second(),
        tx,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    eprintln!("Studying... press Enter to end the session");
    driver.begin_session();

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                if let Event::SessionTicked { elapsed_secs } = event {
                    eprint!("\r{}   ", format::stopwatch(elapsed_secs));
                    let _ = std::io::stderr().flush();
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(_) => break,
                    None => stdin_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    eprintln!();

    let summary = driver.end_session()?;
    print_json(&summary.to_event(chrono::Utc::now()))?;

    let sync = lock(&app).progress_sync();
    if no_sync || sync.roadmap_id().is_none() {
        return Ok(());
    }
    match sync.log_time(summary.elapsed_secs).await {
        Ok((progress, celebration)) => {
            if let Some(progress) = progress {
                print_json(&progress)?;
            }
            print_celebration(&celebration)
        }
        Err(e) => soften(e, "Could not sync study time. Please try again."),
    }
}
