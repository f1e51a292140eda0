use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod utils;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::Subcommand)]
enum Commands {
    /// Infer missing tags from file names
    Infer {
        /// Music directory (defaults to $XDG_MUSIC_DIR, then ~/Music)
        music_dir: Option<String>,
        /// Path to a JSON config file merged over the defaults
        #[arg(long)]
        config: Option<String>,
        /// Show what would be written without touching any file
        #[arg(long)]
        dry_run: bool,
        /// Suppress progress output
        #[arg(long)]
        quiet: bool,
        /// Treat every file as its own group instead of grouping by directory
        #[arg(long)]
        singles: bool,
    },
    /// Print the effective configuration as JSON
    ShowConfig {
        /// Path to a JSON config file merged over the defaults
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    // Load environment variables from a .env file if present
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regtag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Infer {
            music_dir,
            config,
            dry_run,
            quiet,
            singles,
        } => {
            let music_dir = music_dir.unwrap_or_else(utils::get_default_music_dir);
            commands::infer::run(&music_dir, config.as_deref(), dry_run, quiet, singles)
        }
        Commands::ShowConfig { config } => commands::show_config::run(config.as_deref()),
    }
}
