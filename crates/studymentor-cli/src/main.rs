use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "studymentor", version, about = "Study Mentor CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Free-running study stopwatch
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Today's goals
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Today's statistics
    Stats,
    /// Log study time manually
    Log {
        /// Hours studied
        #[arg(long, default_value = "0")]
        hours: u32,
        /// Minutes studied
        #[arg(long, default_value = "0")]
        minutes: u32,
    },
    /// Assistant mode and preferences
    Mode {
        #[command(subcommand)]
        action: commands::mode::ModeAction,
    },
    /// Chat with the mentor (interactive when no message is given)
    Chat {
        /// Message to send
        message: Option<String>,
    },
    /// Learning roadmaps
    Roadmap {
        #[command(subcommand)]
        action: commands::roadmap::RoadmapAction,
    },
    /// Progress on the current roadmap
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// List study techniques
    Techniques,
    /// Today's motivational quote
    Motivation,
    /// Export goals, stats and timer settings to JSON
    Export {
        /// Output file (defaults to study-mentor-data-YYYY-MM-DD.json)
        #[arg(long, short)]
        output: Option<std::path::PathBuf>,
    },
    /// Delete all stored data
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("STUDYMENTOR_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action).await,
        Commands::Session { action } => commands::session::run(action).await,
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Log { hours, minutes } => commands::log::run(hours, minutes).await,
        Commands::Mode { action } => commands::mode::run(action),
        Commands::Chat { message } => commands::chat::run(message).await,
        Commands::Roadmap { action } => commands::roadmap::run(action).await,
        Commands::Progress { action } => commands::progress::run(action).await,
        Commands::Techniques => commands::mentor::techniques().await,
        Commands::Motivation => commands::mentor::motivation().await,
        Commands::Export { output } => commands::data::export(output),
        Commands::Clear { yes } => commands::data::clear(yes),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "studymentor",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
