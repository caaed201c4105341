use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use super::{open_app, CmdResult};

/// Send one message, or read messages from stdin until EOF or `/quit`.
pub async fn run(message: Option<String>) -> CmdResult {
    let mut app = open_app()?;

    if let Some(message) = message {
        if let Some(reply) = app.send_chat(&message).await {
            println!("{reply}");
        }
        return Ok(());
    }

    let mode = app.mode().unwrap_or(studymentor_core::Mode::Focus);
    if app.preferences().show_welcome {
        println!("{}", mode.welcome_message());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("> ");
        std::io::stderr().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line == "/quit" {
            break;
        }
        if let Some(reply) = app.send_chat(line).await {
            println!("{reply}\n");
        }
    }
    Ok(())
}
