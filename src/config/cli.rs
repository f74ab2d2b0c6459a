//!
//! CLI configuration commands for kiicli.
//!
//! - `config show` - Display the resolved configuration
//! - `config init` - Create `~/.kii/config` from the default template
//! - `config validate` - Validate the resolved configuration
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use crate::config::validation::{ConfigValidator, validation_error};
use crate::config::{Config, ConfigKey, paths};
use crate::error::Result;
use std::path::Path;

/* --- types ----------------------------------------------------------------------------------- */

///
/// CLI configuration command handler.
pub struct ConfigCli;

/* --- implementations --------------------------------------------------------------------- */

impl ConfigCli {
    /// Handle the `config init` command
    ///
    /// # Arguments
    /// * `path` - Configuration file to create
    pub fn init(path: &Path) -> Result<()> {
        if paths::ensure_config_file(path)? {
            println!("Created configuration file: {}", path.display());
            println!("Fill in app_id, app_key and site for the [default] profile,");
            println!("then run 'kiicli config validate'.");
        } else {
            println!("Configuration file already exists: {}", path.display());
        }
        Ok(())
    }

    /// Handle the `config show` command
    ///
    /// Secrets are masked; endpoints are shown as resolved.
    pub fn show(config: &Config) -> Result<()> {
        print!("{}", Self::render(config));
        Ok(())
    }

    /// Handle the `config validate` command
    ///
    /// Warnings are printed; errors are returned together for `main` to report.
    pub fn validate(config: &Config) -> Result<()> {
        let (errors, warnings) = ConfigValidator::new(config).collect();

        for warning in &warnings {
            println!("[WARNING] {}", warning);
        }

        if errors.is_empty() {
            println!("[OK] Configuration is valid");
            return Ok(());
        }

        Err(validation_error(&errors))
    }

    /* --- private helper methods ---------------------------------------------------------- */

    /// Build the `config show` output
    fn render(config: &Config) -> String {
        let mut out = String::new();
        out.push_str(&format!("Profile: {}\n", config.profile));
        if let Some(path) = &config.config_file {
            let status = if path.exists() { "exists" } else { "not found" };
            out.push_str(&format!("Config file: {} ({})\n", path.display(), status));
        }
        out.push('\n');

        for key in ConfigKey::ALL {
            let value = match (key, config.get(key)) {
                (_, None) => "(not set)".to_string(),
                (ConfigKey::AppKey | ConfigKey::ClientSecret, Some(secret)) => mask(secret),
                (_, Some(value)) => value.to_string(),
            };
            out.push_str(&format!("  {:<14} {}\n", key.ini_key(), value));
        }
        out.push('\n');

        let endpoint = config.endpoint_url().unwrap_or_else(|e| format!("({})", e));
        let log_endpoint = config.log_endpoint_url().unwrap_or_else(|e| format!("({})", e));
        out.push_str(&format!("API endpoint: {}\n", endpoint));
        out.push_str(&format!("Log endpoint: {}\n", log_endpoint));
        out
    }
}

/// Mask a secret, keeping a short prefix for recognition
fn mask(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}... ({} chars)", prefix, secret.chars().count())
    }
}

/* --- tests ------------------------------------------------------------------------------- */
