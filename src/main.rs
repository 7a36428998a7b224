use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;

use simpbot::application::services::{AnnounceService, ReadySignal};
use simpbot::commands;
use simpbot::domain::entities::{GuildId, MutedUser, Prefix, UserId};
use simpbot::domain::traits::{ConfigStore, Messenger};
use simpbot::infrastructure::adapters::ConsoleAdapter;
use simpbot::infrastructure::config::Config;
use simpbot::infrastructure::database::SqliteStore;
use simpbot::infrastructure::storage::MemoryStore;
use simpbot::infrastructure::wikipedia::WikipediaClient;
use simpbot::{BotError, DispatchOutcome, IngestionPipeline};

#[derive(Parser)]
#[command(name = "simpbot")]
#[command(about = "Guild chat bot with per-guild prefixes and mutes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console gateway
    Run {
        /// Keep settings in memory instead of the database
        #[arg(long)]
        memory: bool,

        /// Post this text to the guild's general channel once connected
        #[arg(long)]
        announce: Option<String>,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// Edit guild settings
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Set the command prefix of a guild
    SetPrefix { guild: GuildId, symbol: char },
    /// Return a guild to the default prefix
    ClearPrefix { guild: GuildId },
    /// Mute a user
    Mute { user: UserId },
    /// Unmute a user
    Unmute { user: UserId },
    /// Print the settings that apply to a guild
    Show { guild: GuildId },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { memory, announce } => match load_config(&cli.config) {
            Ok(config) => run_bot(config, memory, announce).await,
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("simpbot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
        Commands::Admin { action } => match load_config(&cli.config) {
            Ok(config) => run_admin(&config, action),
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &str) -> Result<Config, BotError> {
    Ok(Config::load_or_default(path)?)
}

async fn run_bot(config: Config, memory: bool, announce: Option<String>) -> Result<(), BotError> {
    tracing::info!("Starting {}", config.bot.name);

    let store: Arc<dyn ConfigStore> = if memory {
        tracing::info!("Using in-memory settings");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SqliteStore::open(&config.database.path)?)
    };

    let wiki = Arc::new(WikipediaClient::new(&config.wikipedia.endpoint)?);
    let registry = Arc::new(commands::registry(wiki));

    let adapter = Arc::new(ConsoleAdapter::new(&config.bot.name, config.console.clone()));
    let ready = ReadySignal::new();
    let (events_tx, mut events) = mpsc::channel(64);

    let gateway = {
        let adapter = Arc::clone(&adapter);
        let ready = ready.clone();
        tokio::spawn(async move { adapter.listen(&ready, events_tx).await })
    };

    let info = ready.wait().await?;
    tracing::info!("Bot started: {} ({})", info.name, info.id);

    let messenger: Arc<dyn Messenger> = adapter;

    if let Some(text) = announce {
        AnnounceService::new(Arc::clone(&messenger))
            .announce(GuildId(config.console.guild_id), &text)
            .await?;
    }

    let pipeline = Arc::new(
        IngestionPipeline::new(store, messenger, registry, &info, config.bot.default_prefix)
            .with_handler_timeout(config.handler_timeout()),
    );

    let mut in_flight: Vec<tokio::task::JoinHandle<Option<DispatchOutcome>>> = Vec::new();
    while let Some(message) = events.recv().await {
        in_flight.retain(|run| !run.is_finished());
        in_flight.push(pipeline.spawn(message));
    }

    for run in in_flight {
        if let Err(e) = run.await {
            tracing::error!("Pipeline task panicked: {}", e);
        }
    }

    gateway
        .await
        .map_err(|e| BotError::Internal(format!("gateway task: {}", e)))?
}

fn run_admin(config: &Config, action: AdminAction) -> Result<(), BotError> {
    let store = SqliteStore::open(&config.database.path)?;
    let db = store.admin()?;

    match action {
        AdminAction::SetPrefix { guild, symbol } => {
            if symbol.is_whitespace() {
                return Err(BotError::Parse("prefix must not be whitespace".to_string()));
            }
            db.set_prefix(&Prefix::new(guild, symbol)).map_err(simpbot::StorageError::from)?;
            println!("Guild {} now uses prefix '{}'", guild, symbol);
        }
        AdminAction::ClearPrefix { guild } => {
            let removed = db.clear_prefix(guild).map_err(simpbot::StorageError::from)?;
            if removed {
                println!("Guild {} now uses the default prefix '{}'", guild, config.bot.default_prefix);
            } else {
                println!("Guild {} had no prefix set", guild);
            }
        }
        AdminAction::Mute { user } => {
            db.set_muted(&MutedUser::new(user, true)).map_err(simpbot::StorageError::from)?;
            println!("User {} muted", user);
        }
        AdminAction::Unmute { user } => {
            db.set_muted(&MutedUser::new(user, false)).map_err(simpbot::StorageError::from)?;
            println!("User {} unmuted", user);
        }
        AdminAction::Show { guild } => {
            let prefix = db
                .get_prefix(guild)
                .map_err(simpbot::StorageError::from)?
                .and_then(|p| p.chars().next())
                .unwrap_or(config.bot.default_prefix);
            println!("Guild {} prefix: '{}'", guild, prefix);

            let muted = db.list_muted().map_err(simpbot::StorageError::from)?;
            if muted.is_empty() {
                println!("No muted users");
            } else {
                println!("Muted users:");
                for user in muted {
                    println!("  {}", user.user_id);
                }
            }
        }
    }

    Ok(())
}

fn init_config(path: &str) -> Result<(), BotError> {
    if std::path::Path::new(path).exists() {
        println!("Config already exists at {}", path);
        return Ok(());
    }

    let yaml = Config::default().to_yaml()?;
    std::fs::write(path, yaml).map_err(simpbot::StorageError::from)?;
    println!("Wrote default config to {}", path);
    Ok(())
}
