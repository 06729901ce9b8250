//! Release bot maintenance CLI
//!
//! Prepares repositories for the release flow and prunes merged branches.

use clap::{Parser, Subcommand};
use release_bot::{BotClient, Config, Error};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "release-bot")]
#[command(about = "Release bot repository maintenance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the webhook and create the release labels
    Setup {
        /// Repository owner
        owner: String,

        /// Repository name
        repo: String,

        /// Delete every existing label first
        #[arg(long)]
        reset_labels: bool,
    },

    /// Delete branches that master already contains
    Cleanup {
        /// Repository owner
        owner: String,

        /// Repository name
        repo: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "release_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().map_err(|e| Error::Configuration(e.to_string()))?;
    let client = BotClient::new(&config)?;

    match cli.command {
        Commands::Setup {
            owner,
            repo,
            reset_labels,
        } => {
            let manager = client.repository(&owner, &repo);

            manager.create_initial_hook().await?;

            if reset_labels {
                manager.clear_all_labels().await?;
                manager.create_required_labels().await?;
            } else {
                let created = manager.ensure_labels(&Default::default()).await?;
                info!(count = created.len(), "missing labels created");
            }
        }
        Commands::Cleanup { owner, repo } => {
            let deleted = client.repository(&owner, &repo).cleanup_branches().await?;
            for name in &deleted {
                println!("{name}");
            }
            info!(count = deleted.len(), "cleanup finished");
        }
    }

    Ok(())
}
