//! MPC Autocomplete - Main entrypoint.
//!
//! Builds completion indexes from conversation corpora, answers completion
//! queries from the command line, and serves them over HTTP.

use clap::{Parser, Subcommand};
use mpc_autocomplete_lib::config::{self, LogConfig, MpcConfig};
use mpc_autocomplete_lib::corpus;
use mpc_autocomplete_lib::error::{report_error, ErrorContext, MpcError, MpcResult};
use mpc_autocomplete_lib::model::{create_model, CompletionLimit, SharedModel};
use mpc_autocomplete_lib::server::{self, AppState};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the MPC autocomplete server.
#[derive(Parser, Debug)]
#[clap(name = "mpc_autocomplete", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser, global = true)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Build an index from a conversation corpus
    Build {
        /// Corpus JSON file
        #[clap(value_parser)]
        corpus: PathBuf,

        /// Where to write the index (defaults to model.index_path)
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Load the index and serve completions over HTTP
    Serve,

    /// Print completions for a prefix, one per line
    Complete {
        /// Prefix to complete
        prefix: String,

        /// Number of completions (defaults to model.max_completions)
        #[clap(short, long, allow_hyphen_values = true)]
        limit: Option<i64>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to
/// standard error so command output stays clean.
fn init_logging(log: &LogConfig) -> MpcResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location)
        .with_thread_names(true);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| MpcError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn build(config: &MpcConfig, corpus_path: PathBuf, output: Option<PathBuf>) -> MpcResult<()> {
    let options = config.corpus.ingest_options(config.model.alphabet);
    let entries = corpus::load_entries(&corpus_path, &options)?;

    let mut model = create_model(config.model.kind, config.model.limit()?, config.model.alphabet);
    let inserted = model.build(entries)?;

    let output = output.unwrap_or_else(|| config.model.index_path.clone());
    model.save(&output)?;

    info!(
        corpus = %corpus_path.display(),
        index = %output.display(),
        entries = inserted,
        "Index built"
    );
    Ok(())
}

fn serve(config: &MpcConfig) -> MpcResult<()> {
    let model = server::load_model(
        config.model.kind,
        config.model.limit()?,
        config.model.alphabet,
        &config.model.index_path,
    )?;
    let state = Arc::new(AppState::new(SharedModel::from_boxed(model), &config.model)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.worker_threads)
        .thread_name(config.server.name.clone())
        .enable_all()
        .build()?;

    info!(
        name = %config.server.name,
        workers = config.server.worker_threads,
        "Starting MPC autocomplete server"
    );
    runtime.block_on(server::serve(&config.server, state))
}

fn complete(config: &MpcConfig, prefix: &str, limit: Option<i64>) -> MpcResult<()> {
    let limit = match limit {
        Some(limit) => CompletionLimit::try_from(limit)?,
        None => config.model.limit()?,
    };
    let model = server::load_model(
        config.model.kind,
        limit,
        config.model.alphabet,
        &config.model.index_path,
    )?;

    for completion in model.complete(prefix) {
        println!("{completion}");
    }
    Ok(())
}

fn gen_config(output: PathBuf) -> MpcResult<()> {
    info!("Generating default configuration");

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml = config::to_toml(&MpcConfig::default())?;
    std::fs::write(&output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}

fn run(args: Args) -> MpcResult<()> {
    let loaded = config::load_config(args.config.as_deref());

    let default_log = LogConfig::default();
    let log = match &loaded {
        Ok(config) => &config.log,
        Err(_) => &default_log,
    };
    init_logging(log)?;
    mpc_autocomplete_lib::init();

    match args.command.unwrap_or(Command::Serve) {
        Command::GenConfig { output } => gen_config(output),
        Command::Validate => {
            loaded?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::Build { corpus, output } => build(&loaded?, corpus, output),
        Command::Serve => serve(&loaded?),
        Command::Complete { prefix, limit } => complete(&loaded?, &prefix, limit),
    }
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();
    let command = format!("{:?}", args.command);

    if let Err(e) = run(args) {
        report_error(&ErrorContext::new(e, "cli").with_details(command));
        process::exit(1);
    }
}
