//!
//! Authentication headers and OAuth2 token storage for the Kii Cloud API.
//!
//! Every request carries the application id and key; administrative requests
//! also carry a bearer token obtained with `kiicli auth login` and stored under
//! `~/.kii/<app id>/oauth2.json`.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::path::{Path, PathBuf};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::config::{Config, paths};
use crate::error::{KiiError, Result};

/* --- constants ------------------------------------------------------------------------------ */

/** application id header */
pub const APP_ID_HEADER: &str = "x-kii-appid";

/** application key header */
pub const APP_KEY_HEADER: &str = "x-kii-appkey";

/** bearer token prefix */
const BEARER_PREFIX: &str = "Bearer ";

/** token file name inside the per-app metadata directory */
const TOKEN_FILE_NAME: &str = "oauth2.json";

/* --- types ----------------------------------------------------------------------------------- */

///
/// OAuth2 token response as returned by `/oauth2/token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Token {
    /** the bearer token */
    pub access_token: String,
    /** token type, normally "Bearer" */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /** lifetime in seconds */
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/* --- start of code -------------------------------------------------------------------------- */

impl OAuth2Token {
    ///
    /// Location of the stored token for the configured application.
    pub fn path(config: &Config) -> Result<PathBuf> {
        if config.app_id.is_empty() {
            return Err(KiiError::MissingParameter(
                "missing app id, use --app-id or set KII_APP_ID".to_string(),
            ));
        }
        if !is_safe_path_component(&config.app_id) {
            return Err(KiiError::Config(format!(
                "Invalid app id '{}': it must not contain path separators or '..'",
                config.app_id
            )));
        }
        paths::meta_file_path(&config.app_id, TOKEN_FILE_NAME)
    }

    ///
    /// Read a stored token.
    ///
    /// # Returns
    ///  * The token
    ///  * `KiiError::Auth` if no token has been stored yet
    ///  * `KiiError::Serialization` if the file is corrupt
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(KiiError::Auth(format!(
                "No access token found at '{}'. Run 'kiicli auth login' first.",
                path.display()
            )));
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    ///
    /// Store the token with owner-only permissions.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        paths::restrict_permissions(path, 0o600)?;
        tracing::debug!("Stored access token at: {}", path.display());
        Ok(())
    }
}

///
/// Headers identifying the application.
///
/// # Arguments
///  * `config` - resolved configuration providing app id and key
///  * `content_type` - added as `content-type` when present and non-empty
///
/// # Returns
///  * Header map with `x-kii-appid`, `x-kii-appkey` and optionally `content-type`
///  * `KiiError::Config` if a value is not a valid header value
pub fn http_headers(config: &Config, content_type: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(APP_ID_HEADER), header_value(APP_ID_HEADER, &config.app_id)?);
    headers.insert(HeaderName::from_static(APP_KEY_HEADER), header_value(APP_KEY_HEADER, &config.app_key)?);

    if let Some(content_type) = content_type.filter(|ct| !ct.is_empty()) {
        headers.insert(CONTENT_TYPE, header_value("content-type", content_type)?);
    }
    Ok(headers)
}

///
/// Application headers plus `authorization: Bearer <token>`.
pub fn http_headers_with_authorization(
    config: &Config,
    content_type: Option<&str>,
    token: &OAuth2Token,
) -> Result<HeaderMap> {
    let mut headers = http_headers(config, content_type)?;
    headers.insert(
        AUTHORIZATION,
        header_value("authorization", &format!("{}{}", BEARER_PREFIX, token.access_token))?,
    );
    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| KiiError::Config(format!("Invalid value for header '{}': {}", name, e)))
}

/// App ids name a directory below `~/.kii` and must stay inside it
fn is_safe_path_component(name: &str) -> bool {
    !name.contains(['/', '\\']) && !name.contains("..")
}

/* --- tests ------------------------------------------------------------------------------- */
