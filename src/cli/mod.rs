//! Command-line interface for WatchVault, parsed with clap.

mod commands;

use clap::{Parser, Subcommand};

/// WatchVault - Personal Media Tracker
/// Local-first tracking for anime, films, series, novels, comics and games
#[derive(Parser)]
#[command(name = "watchvault")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a work to the collection
    #[command(alias = "a")]
    Add {
        /// Title of the work
        title: String,
        /// Work type: anime, movie, series, novel, comic, game
        #[arg(long = "type")]
        kind: Option<String>,
        /// Status: ongoing, completed, paused, dropped, not-started, cancelled
        #[arg(long)]
        status: Option<String>,
        /// Release year
        #[arg(long)]
        year: Option<i32>,
        /// Personal rating (1-10)
        #[arg(long)]
        rating: Option<i32>,
        /// Free-text note
        #[arg(long)]
        note: Option<String>,
        /// Where the work was found
        #[arg(long)]
        source: Option<String>,
    },

    /// List works in the collection
    #[command(alias = "ls", alias = "l")]
    List {
        /// Filter by title substring
        #[arg(long)]
        title: Option<String>,
        /// Filter by work type
        #[arg(long = "type")]
        kind: Option<String>,
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
        /// Filter by year
        #[arg(long)]
        year: Option<i32>,
        /// Filter by tag id
        #[arg(long)]
        tag: Option<i32>,
        /// Page number (1-based)
        #[arg(long)]
        page: Option<usize>,
        /// Page size
        #[arg(long)]
        size: Option<usize>,
    },

    /// Show details and episodes for a work
    #[command(alias = "i")]
    Info {
        /// Work ID
        id: String,
    },

    /// Update fields of a work
    #[command(alias = "u")]
    Update {
        /// Work ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New work type
        #[arg(long = "type")]
        kind: Option<String>,
        /// New status
        #[arg(long)]
        status: Option<String>,
        /// New year
        #[arg(long)]
        year: Option<i32>,
        /// New rating
        #[arg(long)]
        rating: Option<i32>,
        /// New review
        #[arg(long)]
        review: Option<String>,
        /// New note
        #[arg(long)]
        note: Option<String>,
        /// New source
        #[arg(long)]
        source: Option<String>,
    },

    /// Mark an episode watched
    #[command(alias = "w")]
    Watch {
        /// Work ID
        id: String,
        /// Episode number
        number: i32,
        /// Season number
        #[arg(long, default_value = "1")]
        season: i32,
    },

    /// Remove a work from the collection
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Work ID
        id: String,
    },

    /// Manage tags
    #[command(alias = "t")]
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },

    /// Show collection statistics
    Stats,

    /// Show database and backup status
    Status,

    /// Export a backup file
    #[command(alias = "e")]
    Export {
        /// Backup format: json or csv
        #[arg(default_value = "json")]
        format: String,
    },

    /// Import a backup file and restore it
    Import {
        /// Path to a .json or .csv backup file
        path: String,
    },

    /// Auto-backup archive operations
    #[command(alias = "b")]
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },

    /// Migrate the legacy flat store into the database
    #[command(alias = "m")]
    Migrate {
        #[command(subcommand)]
        command: Option<MigrateCommands>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// Add a tag
    Add {
        /// Tag name
        name: String,
        /// Tag color, e.g. "#ff8800"
        color: String,
    },
    /// List all tags
    #[command(alias = "ls")]
    List,
    /// Remove a tag
    #[command(alias = "rm")]
    Remove {
        /// Tag ID
        id: i32,
    },
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot the collection into the archive now
    Now,
    /// List retained snapshots
    #[command(alias = "ls")]
    List,
    /// Restore a retained snapshot by date
    Restore {
        /// Date key, e.g. 2024-06-01
        date: String,
    },
}

#[derive(Subcommand)]
pub enum MigrateCommands {
    /// Remove legacy data after a verified migration
    Clear,
}

pub use commands::*;
