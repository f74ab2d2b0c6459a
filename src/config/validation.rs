//!
//! Configuration validation for kiicli.
//!
//! Checks that the resolved credentials and endpoints are usable before any
//! request is made, collecting all problems instead of stopping at the first.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use crate::config::{Config, ConfigKey};
use crate::error::{KiiError, Result};
use std::path::Path;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Configuration validator collecting errors and warnings.
pub struct ConfigValidator<'a> {
    /// Configuration to validate
    config: &'a Config,
    /// Validation errors collected during validation
    errors: Vec<String>,
    /// Validation warnings collected during validation
    warnings: Vec<String>,
}

/* --- implementations --------------------------------------------------------------------- */

impl<'a> ConfigValidator<'a> {
    /// Create a new configuration validator
    pub fn new(config: &'a Config) -> Self {
        Self { config, errors: Vec::new(), warnings: Vec::new() }
    }

    /// Perform configuration validation
    ///
    /// Warnings are logged; errors are reported together.
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is valid
    /// * `Err(KiiError::Config)` - One or more validation errors
    pub fn validate(self) -> Result<()> {
        let (errors, warnings) = self.collect();

        for warning in &warnings {
            tracing::warn!("Configuration warning: {}", warning);
        }

        if !errors.is_empty() {
            return Err(validation_error(&errors));
        }

        tracing::info!("Configuration validation passed");
        Ok(())
    }

    /// Run all checks and return `(errors, warnings)`
    pub fn collect(mut self) -> (Vec<String>, Vec<String>) {
        self.validate_credentials();
        self.validate_endpoints();
        if let Some(path) = self.config.config_file.as_deref() {
            self.validate_file_permissions(path);
        }
        (self.errors, self.warnings)
    }

    /* --- private validation methods ------------------------------------------------------ */

    /// Validate application and client credentials
    fn validate_credentials(&mut self) {
        for key in [ConfigKey::AppId, ConfigKey::AppKey] {
            if self.config.get(key).is_none() {
                self.add_error(format!(
                    "{} is not set. Use --{}, set {} or add {} to profile [{}]",
                    key.ini_key(),
                    key.flag(),
                    key.env_var(),
                    key.ini_key(),
                    self.config.profile
                ));
            }
        }

        let has_id = self.config.get(ConfigKey::ClientId).is_some();
        let has_secret = self.config.get(ConfigKey::ClientSecret).is_some();
        if !has_id || !has_secret {
            self.add_warning(
                "client_id/client_secret are not set: 'kiicli auth login' will not work"
                    .to_string(),
            );
        }
    }

    /// Validate API and log endpoints
    fn validate_endpoints(&mut self) {
        if !self.config.site.is_empty() && self.config.site().is_none() {
            self.add_warning(format!(
                "Unknown site '{}'. Valid sites are: us, jp, cn, sg",
                self.config.site
            ));
        }

        match self.config.endpoint_url() {
            Ok(url) => {
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    self.add_error(format!("Endpoint URL '{}' must use http or https", url));
                } else if url.starts_with("http://") {
                    self.add_warning(format!("Endpoint URL '{}' is not using TLS", url));
                }
            }
            Err(e) => self.add_error(e.to_string()),
        }

        if let Ok(url) = self.config.log_endpoint_url() {
            if !(url.starts_with("wss://") || url.starts_with("ws://")) {
                self.add_warning(format!("Log URL '{}' should use ws or wss", url));
            }
        }
    }

    /// Warn when the credentials file is accessible by other users
    fn validate_file_permissions(&mut self, path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            if let Ok(metadata) = std::fs::metadata(path) {
                let mode = metadata.permissions().mode();
                if mode & 0o077 != 0 {
                    self.add_warning(format!(
                        "Configuration file '{}' is accessible by group/others (permissions: {:o}). \
                         Consider restricting permissions: chmod 600 '{}'",
                        path.display(),
                        mode & 0o777,
                        path.display()
                    ));
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = path;
        }
    }

    /// Add a validation error
    fn add_error(&mut self, error: String) {
        tracing::debug!("Validation error: {}", error);
        self.errors.push(error);
    }

    /// Add a validation warning
    fn add_warning(&mut self, warning: String) {
        tracing::debug!("Validation warning: {}", warning);
        self.warnings.push(warning);
    }
}

///
/// Build the error reported for a list of validation errors.
pub fn validation_error(errors: &[String]) -> KiiError {
    KiiError::Config(format!(
        "Configuration validation failed with {} error(s):\n\n{}\n\
         \n\
         Please fix these issues and try again.\n\
         Run 'kiicli config show' to see where each value comes from.",
        errors.len(),
        errors
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {}", i + 1, e))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/* --- tests ------------------------------------------------------------------------------- */
