pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

use clap::Parser;
use cli::{BackupCommands, Cli, Commands, MigrateCommands, TagCommands};
pub use config::Config;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("WatchVault - Personal Media Tracker");
        println!("Run 'watchvault help' to see available commands.");
        return Ok(());
    };

    match command {
        Commands::Add {
            title,
            kind,
            status,
            year,
            rating,
            note,
            source,
        } => {
            cli::cmd_add(
                &config,
                &title,
                kind.as_deref(),
                status.as_deref(),
                year,
                rating,
                note,
                source,
            )
            .await
        }

        Commands::List {
            title,
            kind,
            status,
            year,
            tag,
            page,
            size,
        } => {
            cli::cmd_list(
                &config,
                title,
                kind.as_deref(),
                status.as_deref(),
                year,
                tag,
                page,
                size,
            )
            .await
        }

        Commands::Info { id } => cli::cmd_info(&config, &id).await,

        Commands::Update {
            id,
            title,
            kind,
            status,
            year,
            rating,
            review,
            note,
            source,
        } => {
            cli::cmd_update(
                &config,
                &id,
                title,
                kind.as_deref(),
                status.as_deref(),
                year,
                rating,
                review,
                note,
                source,
            )
            .await
        }

        Commands::Watch { id, number, season } => {
            cli::cmd_watch(&config, &id, number, season).await
        }

        Commands::Remove { id } => cli::cmd_remove(&config, &id).await,

        Commands::Tag { command } => match command {
            TagCommands::Add { name, color } => cli::cmd_tag_add(&config, &name, &color).await,
            TagCommands::List => cli::cmd_tag_list(&config).await,
            TagCommands::Remove { id } => cli::cmd_tag_remove(&config, id).await,
        },

        Commands::Stats => cli::cmd_stats(&config).await,

        Commands::Status => cli::cmd_status(&config).await,

        Commands::Export { format } => cli::cmd_export(&config, &format).await,

        Commands::Import { path } => cli::cmd_import(&config, &path).await,

        Commands::Backup { command } => match command {
            BackupCommands::Now => cli::cmd_backup_now(&config).await,
            BackupCommands::List => cli::cmd_backup_list(&config).await,
            BackupCommands::Restore { date } => cli::cmd_backup_restore(&config, &date).await,
        },

        Commands::Migrate { command } => match command {
            None => cli::cmd_migrate(&config).await,
            Some(MigrateCommands::Clear) => cli::cmd_migrate_clear(&config).await,
        },

        Commands::Init => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }
    }
}
