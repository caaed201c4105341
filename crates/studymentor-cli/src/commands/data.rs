use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::{open_app, CmdResult};

pub fn export(output: Option<PathBuf>) -> CmdResult {
    let app = open_app()?;
    let doc = app.export();
    let path = output.unwrap_or_else(|| PathBuf::from(doc.file_name()));
    std::fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
    println!("exported to {}", path.display());
    Ok(())
}

pub fn clear(yes: bool) -> CmdResult {
    if !yes {
        eprint!("Are you sure you want to clear all data? This cannot be undone. [y/N] ");
        std::io::stderr().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("aborted");
            return Ok(());
        }
    }
    let mut app = open_app()?;
    app.clear_all()?;
    println!("all data cleared");
    Ok(())
}
