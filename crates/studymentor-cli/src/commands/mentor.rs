use super::{open_app, soften, CmdResult};

pub async fn techniques() -> CmdResult {
    let app = open_app()?;
    println!("{}", app.study_techniques_message().await);
    Ok(())
}

pub async fn motivation() -> CmdResult {
    let app = open_app()?;
    match app.daily_motivation().await {
        Ok(quote) => {
            println!("\"{}\"", quote.text);
            println!("  - {}", quote.author);
            Ok(())
        }
        Err(e) => soften(e, "Could not load today's quote. Please try again."),
    }
}
