//!
//! Layered configuration loading for kiicli.
//!
//! Every setting is looked up in an ordered list of sources and the first
//! non-empty value wins:
//! 1. Command line flags (highest priority)
//! 2. Environment variables
//! 3. Profile section of the INI configuration file (lowest priority)
//!
//! Sources can be added in any order; precedence is fixed by source kind.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use crate::config::{Config, ConfigKey, DEFAULT_PROFILE};
use crate::error::{KiiError, Result};

use ini::Ini;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/* --- types ----------------------------------------------------------------------------------- */

///
/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub site: Option<String>,
    pub endpoint_url: Option<String>,
    pub log_url: Option<String>,
    /// Profile to read from the INI file
    pub profile: Option<String>,
    /// Alternative INI file location
    pub config_file: Option<String>,
}

///
/// Configuration loader implementing the Builder pattern.
pub struct ConfigLoader {
    /// Selected profile
    profile: String,
    /// Values from command line flags
    flags: HashMap<ConfigKey, String>,
    /// Values from environment variables
    env: HashMap<ConfigKey, String>,
    /// Values from the INI profile section
    file: HashMap<ConfigKey, String>,
    /// INI file the profile was read from
    config_file: Option<PathBuf>,
}

/* --- implementations --------------------------------------------------------------------- */

impl ConfigOverrides {
    /// Flag value for a key
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        let value = match key {
            ConfigKey::AppId => &self.app_id,
            ConfigKey::AppKey => &self.app_key,
            ConfigKey::ClientId => &self.client_id,
            ConfigKey::ClientSecret => &self.client_secret,
            ConfigKey::Site => &self.site,
            ConfigKey::EndpointUrl => &self.endpoint_url,
            ConfigKey::LogUrl => &self.log_url,
        };
        value.as_deref()
    }
}

impl ConfigLoader {
    /// Create a loader for the given profile
    ///
    /// # Examples
    /// ```rust
    /// use kiicli::config::ConfigLoader;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ConfigLoader::new("default")
    ///     .with_ini_str("[default]\napp_id = my-app\nsite = jp\n")?
    ///     .build()?;
    /// assert_eq!(config.endpoint_url()?, "https://api-jp.kii.com/api");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            flags: HashMap::new(),
            env: HashMap::new(),
            file: HashMap::new(),
            config_file: None,
        }
    }

    /// Apply command line values
    pub fn with_flags(mut self, overrides: ConfigOverrides) -> Self {
        for key in ConfigKey::ALL {
            if let Some(value) = overrides.get(key) {
                self.flags.insert(key, value.to_string());
            }
        }
        self
    }

    /// Apply `KII_*` environment variables
    pub fn with_env_vars(mut self) -> Self {
        tracing::debug!("Loading configuration from environment variables");

        for key in ConfigKey::ALL {
            if let Ok(value) = env::var(key.env_var()) {
                self.env.insert(key, value);
            }
        }
        self
    }

    /// Load the profile section from an INI file
    ///
    /// # Returns
    /// * `Ok(Self)` - Profile values loaded
    /// * `Err(KiiError)` - File unreadable, malformed, or profile missing
    pub fn with_ini_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading profile '{}' from: {}", self.profile, path.display());

        let ini = Ini::load_from_file(path).map_err(|e| {
            KiiError::Config(format!(
                "Failed to read configuration file '{}': {}\n\
                 \n\
                 Run 'kiicli config init' to create a fresh configuration.",
                path.display(),
                e
            ))
        })?;

        self.apply_ini(&ini, &path.display().to_string())?;
        self.config_file = Some(path.to_path_buf());
        Ok(self)
    }

    /// Load the profile section from INI text
    pub fn with_ini_str(mut self, contents: &str) -> Result<Self> {
        let ini = Ini::load_from_str(contents).map_err(|e| {
            KiiError::Config(format!("Failed to parse configuration: {}", e))
        })?;
        self.apply_ini(&ini, "configuration")?;
        Ok(self)
    }

    /// Resolve every key and build the configuration
    pub fn build(self) -> Result<Config> {
        let config = Config {
            app_id: self.resolve(ConfigKey::AppId),
            app_key: self.resolve(ConfigKey::AppKey),
            client_id: self.resolve(ConfigKey::ClientId),
            client_secret: self.resolve(ConfigKey::ClientSecret),
            site: self.resolve(ConfigKey::Site),
            endpoint_url: non_empty(self.resolve(ConfigKey::EndpointUrl)),
            log_url: non_empty(self.resolve(ConfigKey::LogUrl)),
            config_file: self.config_file,
            profile: self.profile,
        };

        tracing::debug!(
            "Resolved config: profile={}, app_id={}, site={}",
            config.profile,
            config.app_id,
            config.site
        );
        Ok(config)
    }

    /* --- private methods ----------------------------------------------------------------- */

    /// Copy the selected profile's values into the file layer
    fn apply_ini(&mut self, ini: &Ini, origin: &str) -> Result<()> {
        let section = ini.section(Some(self.profile.as_str()));
        let has_values = section.map(|props| !props.is_empty()).unwrap_or(false);

        if self.profile != DEFAULT_PROFILE && !has_values {
            return Err(KiiError::MissingParameter(format!(
                "profile {} is not found in {}",
                self.profile, origin
            )));
        }

        if let Some(props) = section {
            for key in ConfigKey::ALL {
                if let Some(value) = props.get(key.ini_key()) {
                    self.file.insert(key, value.trim().to_string());
                }
            }
        }
        Ok(())
    }

    /// First non-empty value for a key across all sources
    fn resolve(&self, key: ConfigKey) -> String {
        pickup([self.flags.get(&key), self.env.get(&key), self.file.get(&key)])
            .unwrap_or_default()
    }
}

/* --- utility functions ------------------------------------------------------------------- */

///
/// Return the first candidate that is present and non-empty.
///
/// # Examples
/// ```rust
/// use kiicli::config::pickup;
///
/// let flag = String::new();
/// let env = "from-env".to_string();
/// assert_eq!(pickup([Some(&flag), Some(&env), None]), Some("from-env".to_string()));
/// ```
pub fn pickup<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a String>>,
{
    candidates.into_iter().flatten().find(|value| !value.is_empty()).cloned()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/* --- tests ------------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PROFILES: &str = "[default]
app_id = default-app
app_key = default-key
client_id =
client_secret =
site = us

[staging]
app_id = staging-app
app_key = staging-key
site = jp
endpoint_url = http://localhost:8080/api
";

    #[test]
    fn test_pickup_first_non_empty() {
        let empty = String::new();
        let a = "a".to_string();
        let b = "b".to_string();

        assert_eq!(pickup([Some(&a), Some(&b)]), Some("a".to_string()));
        assert_eq!(pickup([None, Some(&empty), Some(&b)]), Some("b".to_string()));
        assert_eq!(pickup([None, Some(&empty)]), None);
        assert_eq!(pickup(Vec::<Option<&String>>::new()), None);
    }

    #[test]
    fn test_default_profile_from_ini() {
        let config = ConfigLoader::new("default").with_ini_str(PROFILES).unwrap().build().unwrap();

        assert_eq!(config.app_id, "default-app");
        assert_eq!(config.app_key, "default-key");
        assert_eq!(config.client_id, "");
        assert_eq!(config.site, "us");
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_named_profile_from_ini() {
        let config = ConfigLoader::new("staging").with_ini_str(PROFILES).unwrap().build().unwrap();

        assert_eq!(config.profile, "staging");
        assert_eq!(config.app_id, "staging-app");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8080/api"));
    }

    #[test]
    fn test_unknown_profile_is_error() {
        let result = ConfigLoader::new("production").with_ini_str(PROFILES);
        match result {
            Err(KiiError::MissingParameter(msg)) => assert!(msg.contains("profile production")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("unknown profile should fail"),
        }
    }

    #[test]
    fn test_missing_default_section_is_allowed() {
        let config = ConfigLoader::new("default").with_ini_str("").unwrap().build().unwrap();
        assert_eq!(config.app_id, "");
    }

    #[test]
    fn test_precedence_flag_env_file() {
        temp_env::with_vars(
            [("KII_APP_ID", Some("env-app")), ("KII_APP_KEY", Some("")), ("KII_SITE", None::<&str>)],
            || {
                let overrides = ConfigOverrides {
                    site: Some("sg".to_string()),
                    app_key: Some(String::new()),
                    ..Default::default()
                };
                // Added in reverse order on purpose
                let config = ConfigLoader::new("default")
                    .with_flags(overrides)
                    .with_env_vars()
                    .with_ini_str(PROFILES)
                    .unwrap()
                    .build()
                    .unwrap();

                assert_eq!(config.app_id, "env-app");
                assert_eq!(config.app_key, "default-key");
                assert_eq!(config.site, "sg");
            },
        );
    }

    #[test]
    fn test_with_ini_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config");
        fs::write(&config_file, PROFILES).unwrap();

        let config = ConfigLoader::new("staging").with_ini_file(&config_file).unwrap().build().unwrap();
        assert_eq!(config.app_id, "staging-app");
        assert_eq!(config.config_file.as_deref(), Some(config_file.as_path()));
    }

    #[test]
    fn test_missing_ini_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigLoader::new("default").with_ini_file(temp_dir.path().join("absent"));
        assert!(matches!(result, Err(KiiError::Config(_))));
    }
}
