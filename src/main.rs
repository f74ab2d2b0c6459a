//! # kiicli - Kii Cloud command-line client
//!
//! Resolves credentials and the region endpoint from flags, `KII_*` environment
//! variables (optionally from `.env`) and `~/.kii/config`, then runs one command.
//!
//! ```bash
//! kiicli --site jp --app-id <id> --app-key <key> config show
//! kiicli auth login
//! kiicli request GET /apps/<id>/buckets
//! kiicli log format '${time} [${level}] ${message}'
//! kiicli log render --format '${level}: ${message}' records.jsonl
//! ```
//!
//! Exit codes: 0 on success, 1 on failure, 2 when a required parameter is missing.
//!
//! Authors: Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp
//!

/* --- uses ------------------------------------------------------------------------------------ */

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use clap::Parser;
use reqwest::Method;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use kiicli::api::{CONTENT_TYPE_JSON, KiiClient};
use kiicli::args::{AuthAction, Cli, Commands, ConfigAction, GlobalArgs, LogAction};
use kiicli::auth::OAuth2Token;
use kiicli::config::LogLevel;
use kiicli::config::cli::ConfigCli;
use kiicli::converter::{LogTemplate, convert_log_format};
use kiicli::error::{KiiError, Result};
use kiicli::Config;

/* --- start of code -------------------------------------------------------------------------- */

///
/// Main application entry point.
///
/// Parses arguments, initializes logging and runs the selected command. Errors
/// are printed line by line to stderr and mapped to an exit code.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    initialize_logging(&cli.global);

    if let Err(e) = run(cli).await {
        let error_msg = format!("{}", e);
        for line in error_msg.lines() {
            eprintln!("{}", line);
        }
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    let load_config = || Config::load(global.overrides());

    match cli.command {
        Commands::Log { action: LogAction::Format { format } } => {
            println!("{}", convert_log_format(&format));
            Ok(())
        }
        Commands::Log { action: LogAction::Render { format, file } } => {
            let template = format.as_deref().map(LogTemplate::parse).unwrap_or_default();
            render_logs(&template, file.as_deref())
        }
        Commands::Log { action: LogAction::Url } => {
            println!("{}", load_config()?.log_endpoint_url()?);
            Ok(())
        }
        Commands::Config { action: ConfigAction::Init } => {
            ConfigCli::init(&Config::config_file_path(&global.overrides())?)
        }
        Commands::Config { action: ConfigAction::Show } => ConfigCli::show(&load_config()?),
        Commands::Config { action: ConfigAction::Validate } => ConfigCli::validate(&load_config()?),
        Commands::Auth { action: AuthAction::Login } => login(&load_config()?).await,
        Commands::Auth { action: AuthAction::Token } => {
            let config = load_config()?;
            let token = OAuth2Token::load(OAuth2Token::path(&config)?)?;
            println!("{}", token.access_token);
            Ok(())
        }
        Commands::Request { method, path, data, content_type, no_auth } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())
                .map_err(|e| KiiError::Http(format!("Invalid HTTP method '{}': {}", method, e)))?;
            let content_type =
                content_type.or_else(|| data.as_ref().map(|_| CONTENT_TYPE_JSON.to_string()));

            let config = load_config()?;
            config.validate()?;
            let client = KiiClient::new(&config)?;
            let response =
                client.request(method, &path, data, content_type.as_deref(), !no_auth).await?;
            println!("{}", response.body);
            Ok(())
        }
    }
}

///
/// Fetch an admin token with the client credentials and store it.
async fn login(config: &Config) -> Result<()> {
    let client = KiiClient::new(config)?;
    let token = client.login().await?;
    let path = OAuth2Token::path(config)?;
    token.save(&path)?;
    info!("Access token stored at {}", path.display());
    println!("Logged in as client {}", config.client_id);
    Ok(())
}

///
/// Render JSON log records from a file or stdin, one per line.
///
/// Lines that are not UTF-8 encoded JSON objects are reported and skipped.
fn render_logs(template: &LogTemplate, file: Option<&Path>) -> Result<()> {
    let mut reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let mut buf = Vec::new();
    let mut number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(['\n', '\r']),
            Err(e) => {
                warn!("Skipping log record on line {}: {}", number, e);
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match template.render_line(line) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => warn!("Skipping log record on line {}: {}", number, e),
        }
    }
    Ok(())
}

///
/// Initialize logging.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug, `KII_LOG_LEVEL`
/// an explicit level, and warn is the default.
fn initialize_logging(global: &GlobalArgs) {
    let log_level = if global.verbose {
        LogLevel::Debug
    } else {
        std::env::var("KII_LOG_LEVEL")
            .ok()
            .and_then(|level| LogLevel::from_str(&level).ok())
            .unwrap_or(LogLevel::Warn)
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level.to_tracing_level()).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
