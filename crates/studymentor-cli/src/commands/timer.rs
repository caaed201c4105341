use std::io::Write;
use std::sync::{Arc, Mutex};

use clap::Subcommand;
use studymentor_core::driver::lock;
use studymentor_core::format;
use studymentor_core::{Driver, Event, IntervalTicker, SharedApp, TimerConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::Instant;

use super::{open_app, print_celebration, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer interactively ([s]tart, [p]ause, [r]eset, [q]uit)
    Run,
    /// Restore the default timer settings
    Reset,
    /// Print the configured work phase as JSON
    ///
    /// Countdown state lives only inside `timer run`, so this always
    /// shows a fresh work phase built from the saved settings.
    Status,
    /// Show or change timer settings
    Settings {
        /// Work phase length in minutes
        #[arg(long)]
        work: Option<u32>,
        /// Short break length in minutes
        #[arg(long)]
        short_break: Option<u32>,
        /// Long break length in minutes
        #[arg(long)]
        long_break: Option<u32>,
        /// Work sessions before a long break
        #[arg(long)]
        sessions_until_long_break: Option<u32>,
        /// Start the next phase automatically
        #[arg(long)]
        auto_start_breaks: Option<bool>,
        /// Ring the terminal bell on phase completion
        #[arg(long)]
        sound: Option<bool>,
    },
}

pub async fn run(action: TimerAction) -> CmdResult {
    match action {
        TimerAction::Run => run_interactive().await,
        TimerAction::Reset => {
            let mut app = open_app()?;
            let celebration = app.save_timer_settings(TimerConfig::default())?;
            print_json(app.timer().config())?;
            print_celebration(&celebration)
        }
        TimerAction::Status => {
            let app = open_app()?;
            print_json(&app.timer().snapshot())
        }
        TimerAction::Settings {
            work,
            short_break,
            long_break,
            sessions_until_long_break,
            auto_start_breaks,
            sound,
        } => {
            let mut app = open_app()?;
            let mut config = app.timer().config().clone();
            let unchanged = config.clone();

            if let Some(v) = work {
                config.work_minutes = v;
            }
            if let Some(v) = short_break {
                config.short_break_minutes = v;
            }
            if let Some(v) = long_break {
                config.long_break_minutes = v;
            }
            if let Some(v) = sessions_until_long_break {
                config.sessions_until_long_break = v;
            }
            if let Some(v) = auto_start_breaks {
                config.auto_start_breaks = v;
            }
            if let Some(v) = sound {
                config.play_sound = v;
            }

            if config == unchanged {
                return print_json(&config);
            }
            let celebration = app.save_timer_settings(config)?;
            print_json(app.timer().config())?;
            print_celebration(&celebration)
        }
    }
}

async fn run_interactive() -> CmdResult {
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
    let auto_start = tokio::time::sleep(std::time::Duration::ZERO);
    tokio::pin!(auto_start);
    let mut auto_start_pending = false;

    eprintln!("[s]tart  [p]ause  [r]eset  [q]uit");
    driver.start_timer();

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                if let Some(delay) = Driver::<IntervalTicker>::auto_start_delay(&event) {
                    auto_start.as_mut().reset(Instant::now() + delay);
                    auto_start_pending = true;
                }
                match event {
                    Event::TimerTicked { phase, remaining_secs } => {
                        eprint!("\r{} {}   ", format::countdown(remaining_secs), phase.label());
                        let _ = std::io::stderr().flush();
                    }
                    other => {
                        eprintln!();
                        print_json(&other)?;
                    }
                }
            }
            () = &mut auto_start, if auto_start_pending => {
                auto_start_pending = false;
                driver.start_timer();
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                match line.trim() {
                    "s" | "start" => {
                        auto_start_pending = false;
                        driver.start_timer();
                    }
                    "p" | "pause" => {
                        auto_start_pending = false;
                        driver.pause_timer();
                    }
                    "r" | "reset" => {
                        auto_start_pending = false;
                        driver.reset_timer();
                    }
                    "q" | "quit" => break,
                    "" => {}
                    other => eprintln!("unknown command: {other}"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    driver.pause_timer();
    let snapshot = lock(&app).timer().snapshot();
    print_json(&snapshot)
}
