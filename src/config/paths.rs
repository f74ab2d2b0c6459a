//!
//! Path resolution for kiicli configuration and metadata files.
//!
//! Everything lives under `~/.kii`:
//! - `~/.kii/config` - per-profile INI file with credentials and site
//! - `~/.kii/<dir>/<file>` - metadata such as stored OAuth2 tokens
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use crate::error::{KiiError, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/* --- constants ------------------------------------------------------------------------------- */

/// Name of the metadata directory in the user's home
const KII_DIR: &str = ".kii";
/// Name of the INI configuration file
const CONFIG_FILE_NAME: &str = "config";

/// Template written when no configuration file exists yet
pub const DEFAULT_CONFIG_TEMPLATE: &str = "[default]
app_id =
app_key =
client_id =
client_secret =
site = us
";

/* --- public functions ------------------------------------------------------------------------ */

/// Get the `~/.kii` directory
///
/// # Returns
/// * `Ok(PathBuf)` - Path to the metadata directory (not created)
/// * `Err(KiiError)` - Unable to determine the home directory
pub fn kii_home() -> Result<PathBuf> {
    let dirs = BaseDirs::new().ok_or_else(|| {
        KiiError::Config(
            "Unable to determine user home directory.\n\
             Please ensure your user account has a valid home directory or set HOME."
                .to_string(),
        )
    })?;
    Ok(dirs.home_dir().join(KII_DIR))
}

/// Get `~/.kii/<dir>/<filename>`, creating `~/.kii/<dir>` if necessary
///
/// # Arguments
/// * `dir` - Subdirectory below `~/.kii` (`"."` for the directory itself)
/// * `filename` - File name inside that directory
pub fn meta_file_path(dir: &str, filename: &str) -> Result<PathBuf> {
    let dir_path = kii_home()?.join(dir);
    ensure_directory_exists(&dir_path)?;
    Ok(dir_path.join(filename))
}

/// Get the default configuration file path (`~/.kii/config`)
pub fn default_config_file() -> Result<PathBuf> {
    meta_file_path(".", CONFIG_FILE_NAME)
}

/// Write the default configuration template if the file does not exist
///
/// # Returns
/// * `Ok(true)` - The file was created
/// * `Ok(false)` - The file already existed and was left untouched
/// * `Err(KiiError)` - The file could not be written
pub fn ensure_config_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        ensure_directory_exists(parent)?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| {
        KiiError::Config(format!(
            "Failed to create configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;
    restrict_permissions(path, 0o600)?;

    tracing::debug!("Created default configuration at: {}", path.display());
    Ok(true)
}

/// Expand `~` and environment variables in file paths
///
/// # Examples
/// ```rust
/// let expanded = kiicli::config::paths::expand_path("$HOME/.kii/config").unwrap();
/// assert!(!expanded.to_string_lossy().contains('$'));
/// ```
pub fn expand_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path_str = path.as_ref().to_string_lossy();

    if path_str.starts_with('~') || path_str.contains('$') {
        let expanded = shellexpand::full(&path_str).map_err(|e| {
            KiiError::Config(format!("Failed to expand path '{}': {}", path_str, e))
        })?;
        return Ok(PathBuf::from(expanded.as_ref()));
    }

    Ok(path.as_ref().to_path_buf())
}

/// Restrict file or directory permissions (no-op outside Unix)
pub fn restrict_permissions<P: AsRef<Path>>(path: P, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path.as_ref(), std::fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }
    Ok(())
}

/* --- private functions ----------------------------------------------------------------------- */

/// Ensure a directory exists, creating it with owner-only access if necessary
fn ensure_directory_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        if !path.is_dir() {
            return Err(KiiError::Config(format!(
                "Path '{}' exists but is not a directory",
                path.display()
            )));
        }
        return Ok(());
    }

    std::fs::create_dir_all(path).map_err(|e| {
        KiiError::Config(format!("Failed to create directory '{}': {}", path.display(), e))
    })?;
    restrict_permissions(path, 0o700)
}

/* --- tests ----------------------------------------------------------------------------------- */
