use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use plugin_sync::config::SyncConfig;
use plugin_sync::dist::build_distribution;
use plugin_sync::logging::{self, LogFormat};
use plugin_sync::store::{FsRecordStore, ReadmeStore};
use plugin_sync::sync::{Enricher, collect_readmes, sync_all};

#[derive(Parser)]
#[command(name = "plugin-sync")]
#[command(version, about = "Enrich plugin registry records and build the catalog")]
struct Cli {
    /// Repository root holding plugins/, icons/ and readmes/
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enrich a single plugin
    Sync { key: String },
    /// Enrich every plugin
    SyncAll,
    /// Fetch README files for every plugin with a repository
    Readmes,
    /// Write the consolidated plugins.json
    Build,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_format, cli.log_file.as_deref())
        .context("failed to initialize logging")?;
    let config = SyncConfig::load(cli.config.as_deref(), cli.root)?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, config))
}

async fn run(command: Command, config: SyncConfig) -> anyhow::Result<()> {
    match command {
        Command::Sync { key } => {
            let enricher = Enricher::from_config(&config)?;
            let record = enricher
                .enrich(&key)
                .await
                .with_context(|| format!("failed to sync plugin {}", key))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::SyncAll => {
            let enricher = Enricher::from_config(&config)?;
            let summary = sync_all(&enricher, config.concurrency_limit()).await?;
            println!("{}", serde_json::to_string(&summary)?);
        }
        Command::Readmes => {
            let enricher = Enricher::from_config(&config)?;
            let readmes = ReadmeStore::new(config.readmes_dir());
            let summary = collect_readmes(
                enricher.store(),
                enricher.sources().source_host.as_ref(),
                &readmes,
                config.concurrency_limit(),
            )
            .await?;
            println!("{}", serde_json::to_string(&summary)?);
        }
        Command::Build => {
            let store = FsRecordStore::new(config.plugins_dir());
            let path = config.dist_file();
            let count = build_distribution(&store, &path).await?;
            info!("Built {} with {} plugins", path.display(), count);
        }
    }

    Ok(())
}
