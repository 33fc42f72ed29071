use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pomoquest", version, about = "Pomodoro timer that pays out coins for focus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive game session
    Play,
    /// Generate one quest and print it as JSON
    Quest,
    /// Print a news snippet about a company
    News {
        /// Company id (pixel_power, code_crafters, pomo_pro)
        company: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// API key management for quest and news generation
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Export a journal entry
    Journal(commands::journal::JournalArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("POMOQUEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play => commands::play::run().await,
        Commands::Quest => commands::generate::quest().await,
        Commands::News { company } => commands::generate::news(&company).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Journal(args) => commands::journal::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
