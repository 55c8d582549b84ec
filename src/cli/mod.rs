//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for nad-ch using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// nad-ch - National Address Database collaboration hub
#[derive(Parser, Debug)]
#[command(name = "nad-ch")]
#[command(version, about, long_about = None)]
#[command(author = "NAD Collaboration Hub Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "nad.toml", env = "NAD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "NAD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a data producer
    AddProducer(commands::producer::AddProducerArgs),

    /// List registered data producers
    ListProducers(commands::producer::ListProducersArgs),

    /// Register a user for a producer
    AddUser(commands::user::AddUserArgs),

    /// Upload a file and record it as a producer's submission
    Ingest(commands::submission::IngestArgs),

    /// List a producer's submissions
    ListSubmissions(commands::submission::ListSubmissionsArgs),

    /// Validate a stored submission against a column map
    Validate(commands::submission::ValidateSubmissionArgs),

    /// Create a column map
    AddColumnMap(commands::column_map::AddColumnMapArgs),

    /// Show a column map
    GetColumnMap(commands::column_map::GetColumnMapArgs),

    /// List a producer's column maps
    ListColumnMaps(commands::column_map::ListColumnMapsArgs),

    /// Replace a column map's mapping
    UpdateColumnMap(commands::column_map::UpdateColumnMapArgs),

    /// Change the source column of one canonical field
    UpdateColumnMapField(commands::column_map::UpdateColumnMapFieldArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Run the selected command and return its exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let config = self.config.as_str();
        match &self.command {
            Commands::AddProducer(args) => args.execute(config).await,
            Commands::ListProducers(args) => args.execute(config).await,
            Commands::AddUser(args) => args.execute(config).await,
            Commands::Ingest(args) => args.execute(config).await,
            Commands::ListSubmissions(args) => args.execute(config).await,
            Commands::Validate(args) => args.execute(config).await,
            Commands::AddColumnMap(args) => args.execute(config).await,
            Commands::GetColumnMap(args) => args.execute(config).await,
            Commands::ListColumnMaps(args) => args.execute(config).await,
            Commands::UpdateColumnMap(args) => args.execute(config).await,
            Commands::UpdateColumnMapField(args) => args.execute(config).await,
            Commands::ValidateConfig(args) => args.execute(config).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}
