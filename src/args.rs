//!
//! Command line arguments for kiicli.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ConfigOverrides, DEFAULT_PROFILE};

/* --- types ----------------------------------------------------------------------------------- */

#[derive(Parser, Debug)]
#[command(name = "kiicli", version)]
#[command(about = "Command-line client for the Kii Cloud API", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// AppID
    #[arg(long, global = true)]
    pub app_id: Option<String>,

    /// AppKey
    #[arg(long, global = true)]
    pub app_key: Option<String>,

    /// ClientID
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// ClientSecret
    #[arg(long, global = true)]
    pub client_secret: Option<String>,

    /// Site: us, jp, cn, sg
    #[arg(long, global = true)]
    pub site: Option<String>,

    /// API endpoint URL (overrides --site)
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Log stream URL (overrides --site)
    #[arg(long, global = true)]
    pub log_url: Option<String>,

    /// Profile name in ~/.kii/config
    #[arg(long, global = true, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Alternative configuration file
    #[arg(long, global = true)]
    pub config_file: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Obtain or inspect the admin access token
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Log display helpers
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Send a request to the API
    Request {
        /// HTTP method (GET, POST, PUT, DELETE, ...)
        method: String,

        /// Path relative to the API endpoint, e.g. /apps/<app id>/buckets
        path: String,

        /// Request body
        #[arg(short, long)]
        data: Option<String>,

        /// Content type of the body
        #[arg(long)]
        content_type: Option<String>,

        /// Do not send the stored access token
        #[arg(long)]
        no_auth: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved configuration
    Show,
    /// Create the configuration file if missing
    Init,
    /// Validate the resolved configuration
    Validate,
}

#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Fetch an admin token with client credentials and store it
    Login,
    /// Print the stored access token
    Token,
}

#[derive(Subcommand, Debug)]
pub enum LogAction {
    /// Convert a ${name} display format to {{.name}} template form
    Format {
        /// Display format, e.g. "${time} [${level}] ${message}"
        format: String,
    },

    /// Render JSON log records (one per line) with a display format
    Render {
        /// Display format; defaults to "${time} [${level}] ${message}"
        #[arg(short, long)]
        format: Option<String>,

        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// Print the log stream URL
    Url,
}

/* --- implementations --------------------------------------------------------------------- */

impl GlobalArgs {
    /// Values to feed into the configuration loader
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            app_id: self.app_id.clone(),
            app_key: self.app_key.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            site: self.site.clone(),
            endpoint_url: self.endpoint_url.clone(),
            log_url: self.log_url.clone(),
            profile: Some(self.profile.clone()),
            config_file: self.config_file.clone(),
        }
    }
}

/* --- tests ------------------------------------------------------------------------------- */
