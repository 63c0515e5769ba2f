use boxoffice_cli::{commands, migrations};
use boxoffice_migrate::{MigrateError, MigrateResult, MigrationConfig, MigrationRunner};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boxoffice")]
#[command(about = "Schema migration tooling for the boxoffice ticketing platform")]
struct Cli {
    /// Database connection string; falls back to DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations
    Migrate,

    /// Revert the most recent batch, or the last N units with --step
    Rollback {
        /// Number of units to revert instead of the whole last batch
        #[arg(long)]
        step: Option<usize>,
    },

    /// List applied and pending migrations
    Status,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", console::style("error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> MigrateResult<()> {
    let database_url = cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .ok_or_else(|| {
            MigrateError::Connection(
                "no database URL: pass --database-url or set DATABASE_URL".to_string(),
            )
        })?;

    let registry = migrations::registry()?;
    let runner =
        MigrationRunner::from_url(registry, &database_url, MigrationConfig::default()).await?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&runner).await,
        Commands::Rollback { step } => commands::rollback::run(&runner, step).await,
        Commands::Status => commands::status::run(&runner).await,
    }
}
