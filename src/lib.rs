//! # kiicli - Kii Cloud command-line client library
//!
//! Resolves credentials and region endpoints from flags, environment variables
//! and a per-profile INI file, attaches authentication headers to API requests,
//! and renders the log stream through user-defined display formats.
//!
//! ## Library Usage
//!
//! ```rust
//! use kiicli::config::ConfigLoader;
//! use kiicli::converter::{LogTemplate, convert_log_format};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new("default")
//!     .with_ini_str("[default]\napp_id = my-app\napp_key = my-key\nsite = us\n")?
//!     .build()?;
//! assert_eq!(config.endpoint_url()?, "https://api.kii.com/api");
//!
//! assert_eq!(convert_log_format("${time} [${level}]"), "{{.time}} [{{.level}}]");
//! let line = LogTemplate::default().render_line(r#"{"time":"t","level":"INFO","message":"m"}"#)?;
//! assert_eq!(line, "t [INFO] m");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Layered configuration resolution and validation
//! - [`auth`] - Application and bearer headers, token storage
//! - [`api`] - HTTP client for the REST API
//! - [`converter`] - Log format conversion and rendering
//! - [`args`] - Command line definition
//! - [`error`] - Error types and handling

pub mod api;
pub mod args;
pub mod auth;
pub mod config;
pub mod converter;
pub mod error;

// Re-export commonly used types
pub use config::{Config, ConfigLoader, Site};
pub use converter::{LogTemplate, convert_log_format};
pub use error::{KiiError, Result};
