//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod audit_cmd;
mod catalog;
mod documents;
mod import;
mod ingest;
mod init;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Forklift equipment catalog with brochure ingestion")]
#[command(version)]
pub struct Cli {
    /// Data directory (overrides config file)
    #[arg(long, short = 't', global = true)]
    target: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and seed the catalog
    Init,

    /// Add a catalog record (rejects duplicate brand/model pairs)
    Add(RecordArgs),

    /// Update fields of an existing record by id
    Update {
        /// Record id
        id: i64,
        #[command(flatten)]
        fields: RecordArgs,
    },

    /// Remove a record by id
    Rm {
        /// Record id
        id: i64,
    },

    /// Show one record as JSON
    Show {
        /// Record id
        id: i64,
    },

    /// List catalog records
    List {
        /// Emit the full records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ingest a brochure: store it, extract fields, merge into the catalog
    Ingest {
        /// Brochure file to ingest
        file: PathBuf,
        /// Brand the document belongs to
        #[arg(short, long)]
        brand: String,
        /// Model or series name on the document
        #[arg(short, long)]
        model: String,
    },

    /// Bulk-import rows from a JSON array file
    Import {
        /// File containing a JSON array of field objects
        file: PathBuf,
    },

    /// Audit document/catalog cross-references
    Audit {
        /// Back-fill document links on records missing one
        #[arg(long)]
        repair: bool,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage uploaded documents
    Documents {
        #[command(subcommand)]
        command: DocumentCommands,
    },
}

#[derive(Subcommand)]
enum DocumentCommands {
    /// List uploaded documents
    List,
    /// Remove a document and its stored file
    Rm {
        /// Document id
        id: i64,
    },
}

/// Field flags shared by `add` and `update`. Values are passed through
/// the normalizers, so unit suffixes are fine ("2500kg", "12 months").
#[derive(Args, Debug, Default)]
pub struct RecordArgs {
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub tier: Option<String>,
    #[arg(long)]
    pub capacity: Option<String>,
    #[arg(long)]
    pub lift_height: Option<String>,
    #[arg(long)]
    pub power: Option<String>,
    #[arg(long)]
    pub weight: Option<String>,
    #[arg(long)]
    pub turn_radius: Option<String>,
    #[arg(long)]
    pub speed: Option<String>,
    #[arg(long)]
    pub price_min: Option<String>,
    #[arg(long)]
    pub price_max: Option<String>,
    #[arg(long)]
    pub warranty: Option<String>,
    #[arg(long)]
    pub availability: Option<String>,
    #[arg(long)]
    pub score: Option<String>,
    #[arg(long)]
    pub capacity_label: Option<String>,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref(), cli.target.as_deref())?;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Add(args) => catalog::cmd_add(&settings, args).await,
        Commands::Update { id, fields } => catalog::cmd_update(&settings, id, fields).await,
        Commands::Rm { id } => catalog::cmd_rm(&settings, id).await,
        Commands::Show { id } => catalog::cmd_show(&settings, id).await,
        Commands::List { json } => catalog::cmd_list(&settings, json).await,
        Commands::Ingest { file, brand, model } => {
            ingest::cmd_ingest(&settings, &file, &brand, &model).await
        }
        Commands::Import { file } => import::cmd_import(&settings, &file).await,
        Commands::Audit { repair, json } => {
            audit_cmd::cmd_audit(&settings, repair, json).await
        }
        Commands::Documents { command } => match command {
            DocumentCommands::List => documents::cmd_list(&settings).await,
            DocumentCommands::Rm { id } => documents::cmd_rm(&settings, id).await,
        },
    }
}
