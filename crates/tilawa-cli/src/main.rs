use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tilawa_core::{storage::Database, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "tilawa")]
#[command(author, version, about = "A terminal Quran reader with auto-scroll reading mode")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run {
        /// Open this surah (1-114) on start
        #[arg(short, long)]
        surah: Option<u32>,
    },
    /// List surahs
    Surahs {
        /// Filter by English name, meaning or number
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Print a surah's verses
    Read {
        /// Surah number (1-114)
        surah: u32,
        /// Translation edition (e.g. "en.sahih")
        #[arg(short, long)]
        edition: Option<String>,
        /// Print only the Arabic text
        #[arg(long)]
        no_translation: bool,
    },
    /// Manage bookmarks
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// Show or change stored preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// List bookmarks, newest first
    List,
    /// Bookmark a verse
    Add {
        /// Surah number (1-114)
        surah: u32,
        /// Verse number within the surah
        verse: u32,
        /// Title (defaults to "<surah> - Ayah <n>")
        #[arg(short, long)]
        title: Option<String>,
        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a bookmark by id
    Delete {
        /// Bookmark id
        id: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// List stored settings and effective values
    List,
    /// Print one setting
    Get {
        /// theme, scroll_speed, show_translation or translation_edition
        key: String,
    },
    /// Store one setting
    Set {
        key: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let command = cli.command.unwrap_or(Commands::Run { surah: None });
    init_logging(&config, matches!(command, Commands::Run { .. }))?;

    // Initialize database
    let db = Arc::new(Database::new(&config).await?);

    // Handle commands
    match command {
        Commands::Run { surah } => commands::run::run(config, db, surah).await,
        Commands::Surahs { search } => commands::surahs::run(&config, search.as_deref()).await,
        Commands::Read {
            surah,
            edition,
            no_translation,
        } => commands::read::run(&db, &config, surah, edition, no_translation).await,
        Commands::Bookmarks { action } => match action {
            BookmarkAction::List => commands::bookmarks::list(&db).await,
            BookmarkAction::Add {
                surah,
                verse,
                title,
                notes,
            } => {
                commands::bookmarks::add(&db, &config, surah, verse, title.as_deref(), notes.as_deref())
                    .await
            }
            BookmarkAction::Delete { id } => commands::bookmarks::delete(&db, &id).await,
        },
        Commands::Settings { action } => match action {
            SettingsAction::List => commands::settings::list(&db, &config).await,
            SettingsAction::Get { key } => commands::settings::get(&db, &config, &key).await,
            SettingsAction::Set { key, value } => commands::settings::set(&db, &key, &value).await,
        },
    }
}

/// Initialize logging. The TUI owns the terminal, so it logs to a file.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
