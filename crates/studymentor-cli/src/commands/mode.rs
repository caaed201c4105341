use clap::Subcommand;
use serde_json::json;
use studymentor_core::{Mode, Preferences};

use super::{open_app, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ModeAction {
    /// Print the current mode and preferences
    Show,
    /// Select a mode ("focus" or "friendly")
    Set {
        mode: Mode,
    },
    /// Switch between focus and friendly
    Toggle,
    /// Change preferences
    Prefs {
        /// Remember the selected mode across runs
        #[arg(long)]
        remember_mode: Option<bool>,
        /// Print the welcome message when a mode is selected
        #[arg(long)]
        show_welcome: Option<bool>,
    },
}

pub fn run(action: ModeAction) -> CmdResult {
    let mut app = open_app()?;

    match action {
        ModeAction::Show => {
            print_json(&json!({
                "mode": app.mode(),
                "preferences": app.preferences(),
            }))?;
        }
        ModeAction::Set { mode } => {
            let welcome = app.select_mode(mode)?;
            announce(app.preferences(), mode, welcome);
        }
        ModeAction::Toggle => {
            let mode = app.toggle_mode()?;
            announce(app.preferences(), mode, mode.welcome_message());
        }
        ModeAction::Prefs {
            remember_mode,
            show_welcome,
        } => {
            let current = app.preferences();
            let prefs = Preferences {
                remember_mode: remember_mode.unwrap_or(current.remember_mode),
                show_welcome: show_welcome.unwrap_or(current.show_welcome),
            };
            app.set_preferences(prefs)?;
            print_json(&prefs)?;
        }
    }
    Ok(())
}

fn announce(prefs: Preferences, mode: Mode, welcome: &str) {
    println!("{}", mode.label());
    if prefs.show_welcome {
        println!("{welcome}");
    }
}
