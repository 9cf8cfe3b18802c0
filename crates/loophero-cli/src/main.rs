use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "loophero-cli", version, about = "LoopHero CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// First-run onboarding flag
    Setup {
        #[command(subcommand)]
        action: commands::setup::SetupAction,
    },
    /// List monitored apps
    Apps {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the observer over a JSON-lines event feed
    Watch(commands::watch::WatchArgs),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Config { action } => commands::config::run(action),
        Commands::Setup { action } => commands::setup::run(action),
        Commands::Apps { json } => commands::apps::run(json),
        Commands::Watch(args) => commands::watch::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
