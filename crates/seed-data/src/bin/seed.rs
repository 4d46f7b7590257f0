//! Initializes the residency tracker database.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! cargo run -p seed-data --bin seed -- reset --yes
//! ```
//!
//! Without arguments this connects with `service-account.json` from the
//! working directory and runs setup.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use seed_data::config::{
    CredentialSource, DEFAULT_CREDENTIALS_FILE, DEFAULT_DATABASE, StoreConfig,
};
use seed_data::db::{Seeder, SetupOutcome};
use seed_data::store::{DocumentStore, MemoryStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seed", version, about = "Seed the residency tracker database")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Service-account key file.
    #[arg(long, global = true, env = "SEED_CREDENTIALS", default_value = DEFAULT_CREDENTIALS_FILE)]
    credentials: PathBuf,
    /// Use credentials from the environment instead of a key file.
    #[arg(long, global = true)]
    ambient: bool,
    #[arg(long, global = true, env = "GOOGLE_CLOUD_PROJECT")]
    project_id: Option<String>,
    #[arg(long, global = true, default_value = DEFAULT_DATABASE)]
    database: String,
    /// Seed an in-memory store and print the result instead of connecting.
    #[arg(long, global = true)]
    dry_run: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Write the initial data unless the database is already initialized.
    Setup,
    /// Delete all application data, then run setup.
    Reset {
        /// Confirm that every document should be deleted.
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    fn store_config(&self) -> StoreConfig {
        let credentials = if self.ambient {
            CredentialSource::Ambient
        } else {
            CredentialSource::File(self.credentials.clone())
        };

        StoreConfig {
            credentials,
            project_id: self.project_id.clone(),
            database: self.database.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Setup);

    if let Command::Reset { yes: false } = command {
        bail!("reset deletes every document; pass --yes to confirm");
    }

    if cli.dry_run {
        let seeder = Seeder::new(MemoryStore::new());
        run(&seeder, command).await?;
        println!("{}", serde_json::to_string_pretty(&seeder.store().to_json())?);
        return Ok(());
    }

    let seeder = Seeder::connect(&cli.store_config()).await?;
    run(&seeder, command).await
}

async fn run<S: DocumentStore>(seeder: &Seeder<S>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Setup => {
            if let SetupOutcome::Seeded(report) = seeder.setup_complete_database().await? {
                tracing::info!("Seeded {} documents", report.total());
            }
        }
        Command::Reset { .. } => {
            let report = seeder.reset_database().await?;
            tracing::info!("Deleted {} documents", report.total_deleted());
        }
    }

    Ok(())
}
