//!
//! Configuration management for kiicli.
//!
//! Settings are resolved once at startup into an immutable [`Config`] which is
//! then passed to every component that needs it. Each value is taken from the
//! first non-empty source in this order:
//! 1. Command line flags
//! 2. Environment variables (`KII_*`, also read from `.env`)
//! 3. The selected profile section of `~/.kii/config`
//!
//! - `loader.rs` - Layered value resolution
//! - `paths.rs` - `~/.kii` path handling
//! - `validation.rs` - Configuration validation
//! - `cli.rs` - `config` subcommands
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- modules --------------------------------------------------------------------------------- */

pub mod cli;
pub mod loader;
pub mod paths;
pub mod validation;

/* --- uses ------------------------------------------------------------------------------------ */

use std::fmt;
use std::path::PathBuf;

use crate::error::{KiiError, Result};

pub use loader::{ConfigLoader, ConfigOverrides, pickup};

/* --- constants ------------------------------------------------------------------------------- */

/// Profile used when none is selected
pub const DEFAULT_PROFILE: &str = "default";

/// Message shown when no endpoint can be derived
const MISSING_SITE: &str = "missing site, use --site or set KII_SITE";

/* --- types ----------------------------------------------------------------------------------- */

///
/// Kii Cloud deployment region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Us,
    Jp,
    Cn,
    Sg,
}

///
/// A resolvable configuration setting.
///
/// Each key has one name per source: CLI flag, environment variable and INI key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    AppId,
    AppKey,
    ClientId,
    ClientSecret,
    Site,
    EndpointUrl,
    LogUrl,
}

///
/// Logging level enumeration compatible with the tracing crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

///
/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Selected profile in the INI file
    pub profile: String,
    /// Application identifier sent as `x-kii-appid`
    pub app_id: String,
    /// Application key sent as `x-kii-appkey`
    pub app_key: String,
    /// Client credentials used to obtain an admin token
    pub client_id: String,
    pub client_secret: String,
    /// Site name as configured (`us`, `jp`, `cn`, `sg`)
    pub site: String,
    /// Explicit API endpoint, overrides the site table
    pub endpoint_url: Option<String>,
    /// Explicit log stream endpoint, overrides the site table
    pub log_url: Option<String>,
    /// Configuration file the profile was read from
    pub config_file: Option<PathBuf>,
}

/* --- implementations --------------------------------------------------------------------- */

impl Site {
    /// All known sites
    pub const ALL: [Site; 4] = [Site::Us, Site::Jp, Site::Cn, Site::Sg];

    /// Parse a site name (case-insensitive); `None` for unknown or empty names
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "us" => Some(Site::Us),
            "jp" => Some(Site::Jp),
            "cn" => Some(Site::Cn),
            "sg" => Some(Site::Sg),
            _ => None,
        }
    }

    /// Short name used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Us => "us",
            Site::Jp => "jp",
            Site::Cn => "cn",
            Site::Sg => "sg",
        }
    }

    /// REST API host for this site
    pub fn api_host(&self) -> &'static str {
        match self {
            Site::Us => "api.kii.com",
            Site::Jp => "api-jp.kii.com",
            Site::Cn => "api-cn2.kii.com",
            Site::Sg => "api-sg.kii.com",
        }
    }

    /// Log stream host for this site
    pub fn log_host(&self) -> &'static str {
        match self {
            Site::Us => "apilog.kii.com",
            Site::Jp => "apilog-jp.kii.com",
            Site::Cn => "apilog-cn2.kii.com",
            Site::Sg => "apilog-sg.kii.com",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigKey {
    /// All keys in resolution order of display
    pub const ALL: [ConfigKey; 7] = [
        ConfigKey::AppId,
        ConfigKey::AppKey,
        ConfigKey::ClientId,
        ConfigKey::ClientSecret,
        ConfigKey::Site,
        ConfigKey::EndpointUrl,
        ConfigKey::LogUrl,
    ];

    /// Command line flag name (without leading dashes)
    pub fn flag(&self) -> &'static str {
        match self {
            ConfigKey::AppId => "app-id",
            ConfigKey::AppKey => "app-key",
            ConfigKey::ClientId => "client-id",
            ConfigKey::ClientSecret => "client-secret",
            ConfigKey::Site => "site",
            ConfigKey::EndpointUrl => "endpoint-url",
            ConfigKey::LogUrl => "log-url",
        }
    }

    /// Environment variable name
    pub fn env_var(&self) -> &'static str {
        match self {
            ConfigKey::AppId => "KII_APP_ID",
            ConfigKey::AppKey => "KII_APP_KEY",
            ConfigKey::ClientId => "KII_CLIENT_ID",
            ConfigKey::ClientSecret => "KII_CLIENT_SECRET",
            ConfigKey::Site => "KII_SITE",
            ConfigKey::EndpointUrl => "KII_ENDPOINT_URL",
            ConfigKey::LogUrl => "KII_LOG_URL",
        }
    }

    /// Key inside a profile section of the INI file
    pub fn ini_key(&self) -> &'static str {
        match self {
            ConfigKey::AppId => "app_id",
            ConfigKey::AppKey => "app_key",
            ConfigKey::ClientId => "client_id",
            ConfigKey::ClientSecret => "client_secret",
            ConfigKey::Site => "site",
            ConfigKey::EndpointUrl => "endpoint_url",
            ConfigKey::LogUrl => "log_url",
        }
    }
}

impl Config {
    ///
    /// Load configuration from flags, environment and the INI file.
    ///
    /// Loads `.env` first, creates `~/.kii/config` from the default template if
    /// it is missing, then resolves every key with flag > env > file precedence.
    ///
    /// # Arguments
    /// * `overrides` - values given on the command line
    ///
    /// # Returns
    /// * `Ok(Config)` - Resolved configuration
    /// * `Err(KiiError)` - Unreadable config file or unknown profile
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let config_file = Self::config_file_path(&overrides)?;
        paths::ensure_config_file(&config_file)?;

        let profile = overrides.profile.clone().unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        ConfigLoader::new(profile)
            .with_ini_file(&config_file)?
            .with_env_vars()
            .with_flags(overrides)
            .build()
    }

    ///
    /// INI file to read: `--config-file`, then `KII_CONFIG_FILE`, then `~/.kii/config`.
    pub fn config_file_path(overrides: &ConfigOverrides) -> Result<PathBuf> {
        match overrides.config_file.as_deref() {
            Some(path) if !path.trim().is_empty() => paths::expand_path(path.trim()),
            _ => match std::env::var("KII_CONFIG_FILE") {
                Ok(path) if !path.trim().is_empty() => paths::expand_path(path.trim()),
                _ => paths::default_config_file(),
            },
        }
    }

    /// Parsed site, if the configured name is known
    pub fn site(&self) -> Option<Site> {
        Site::parse(&self.site)
    }

    ///
    /// REST API base URL.
    ///
    /// # Returns
    /// * The explicit endpoint URL if configured, else `https://<api host>/api`
    /// * `KiiError::MissingParameter` if neither is available
    pub fn endpoint_url(&self) -> Result<String> {
        if let Some(url) = &self.endpoint_url {
            return Ok(url.clone());
        }
        self.site()
            .map(|site| format!("https://{}/api", site.api_host()))
            .ok_or_else(|| KiiError::MissingParameter(MISSING_SITE.to_string()))
    }

    ///
    /// Log stream URL.
    ///
    /// # Returns
    /// * The explicit log URL if configured, else `wss://<log host>:443/logs`
    /// * `KiiError::MissingParameter` if neither is available
    pub fn log_endpoint_url(&self) -> Result<String> {
        if let Some(url) = &self.log_url {
            return Ok(url.clone());
        }
        self.site()
            .map(|site| format!("wss://{}:443/logs", site.log_host()))
            .ok_or_else(|| KiiError::MissingParameter(MISSING_SITE.to_string()))
    }

    /// Validate the configuration, see [`validation::ConfigValidator`]
    pub fn validate(&self) -> Result<()> {
        validation::ConfigValidator::new(self).validate()
    }

    /// Resolved value for a key, `None` when empty
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        let value = match key {
            ConfigKey::AppId => self.app_id.as_str(),
            ConfigKey::AppKey => self.app_key.as_str(),
            ConfigKey::ClientId => self.client_id.as_str(),
            ConfigKey::ClientSecret => self.client_secret.as_str(),
            ConfigKey::Site => self.site.as_str(),
            ConfigKey::EndpointUrl => self.endpoint_url.as_deref().unwrap_or(""),
            ConfigKey::LogUrl => self.log_url.as_deref().unwrap_or(""),
        };
        if value.is_empty() { None } else { Some(value) }
    }
}

impl LogLevel {
    /// Convert to tracing::Level for logging setup
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(KiiError::Config(format!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

/* --- tests ------------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for_site(site: &str) -> Config {
        Config {
            profile: DEFAULT_PROFILE.to_string(),
            app_id: "app".to_string(),
            app_key: "key".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            site: site.to_string(),
            endpoint_url: None,
            log_url: None,
            config_file: None,
        }
    }

    #[test]
    fn test_endpoint_urls_per_site() {
        let expected = [
            ("us", "https://api.kii.com/api", "wss://apilog.kii.com:443/logs"),
            ("jp", "https://api-jp.kii.com/api", "wss://apilog-jp.kii.com:443/logs"),
            ("cn", "https://api-cn2.kii.com/api", "wss://apilog-cn2.kii.com:443/logs"),
            ("sg", "https://api-sg.kii.com/api", "wss://apilog-sg.kii.com:443/logs"),
        ];
        for (site, api, log) in expected {
            let config = config_for_site(site);
            assert_eq!(config.endpoint_url().unwrap(), api);
            assert_eq!(config.log_endpoint_url().unwrap(), log);
        }
    }

    #[test]
    fn test_explicit_urls_win_over_site() {
        let mut config = config_for_site("");
        config.endpoint_url = Some("http://localhost:8080/api".to_string());
        config.log_url = Some("ws://localhost:8081/logs".to_string());

        assert_eq!(config.endpoint_url().unwrap(), "http://localhost:8080/api");
        assert_eq!(config.log_endpoint_url().unwrap(), "ws://localhost:8081/logs");
    }

    #[test]
    fn test_missing_site_is_missing_parameter() {
        for site in ["", "eu"] {
            let config = config_for_site(site);
            assert!(matches!(config.endpoint_url(), Err(KiiError::MissingParameter(_))));
            assert!(matches!(config.log_endpoint_url(), Err(KiiError::MissingParameter(_))));
        }
    }

    #[test]
    fn test_site_parse_is_case_insensitive() {
        assert_eq!(Site::parse("JP"), Some(Site::Jp));
        assert_eq!(Site::parse(" sg "), Some(Site::Sg));
        assert_eq!(Site::parse("mars"), None);
        for site in Site::ALL {
            assert_eq!(Site::parse(&site.to_string()), Some(site));
        }
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("TRACE").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_get_treats_empty_as_none() {
        let config = config_for_site("us");
        assert_eq!(config.get(ConfigKey::AppId), Some("app"));
        assert_eq!(config.get(ConfigKey::ClientId), None);
        assert_eq!(config.get(ConfigKey::EndpointUrl), None);
    }
}
