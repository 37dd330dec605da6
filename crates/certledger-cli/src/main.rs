//! certledger - invoke credential ledger operations from the command line

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use certledger_contract::{Dispatcher, Response};
use certledger_store::{open_ledger, Ledger, LedgerConfig, StoreError};
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "certledger",
    version,
    about = "Credential records on an ordered key-value ledger"
)]
struct Cli {
    /// redb ledger file; an in-memory ledger is used when omitted
    #[arg(long, global = true, conflicts_with = "config")]
    db: Option<PathBuf>,

    /// JSON ledger configuration, e.g. {"type": "redb", "path": "ledger.redb"}
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Invoke one operation with its arguments
    Invoke {
        /// Operation name, e.g. queryAll
        operation: String,
        /// Positional operation arguments
        args: Vec<String>,
    },
    /// List operations and how many arguments each takes
    Operations,
    /// Run the instantiate hook
    Init,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let dispatcher = Dispatcher::new();

    let response = match cli.command {
        Command::Operations => {
            let mut out = std::io::stdout().lock();
            for op in dispatcher.operations() {
                writeln!(out, "{}\t{}", op.name(), op.arity())?;
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::Init => dispatcher.init(),
        Command::Invoke { operation, args } => {
            let config = ledger_config(cli.db, cli.config.as_deref())?;
            let ledger = open(&config)?;
            debug!(operation = %operation, args = args.len(), "invoking");
            dispatcher.invoke(ledger.as_ref(), &operation, &args)
        }
    };

    emit(response)
}

fn ledger_config(db: Option<PathBuf>, config: Option<&Path>) -> Result<LedgerConfig, CliError> {
    if let Some(path) = db {
        return Ok(LedgerConfig::Redb { path });
    }
    let Some(path) = config else {
        return Ok(LedgerConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Open the configured ledger
fn open(config: &LedgerConfig) -> Result<Box<dyn Ledger>, CliError> {
    debug!(?config, "opening ledger");
    Ok(open_ledger(config)?)
}

fn emit(response: Response) -> Result<ExitCode, CliError> {
    match response {
        Response::Success { payload } => {
            let mut out = std::io::stdout().lock();
            if !payload.is_empty() {
                out.write_all(&payload)?;
                out.write_all(b"\n")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Response::Failure { message } => {
            eprintln!("error: {}", message);
            Ok(ExitCode::FAILURE)
        }
    }
}
