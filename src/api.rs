//!
//! HTTP client for the Kii Cloud REST API.
//!
//! Builds URLs from the resolved endpoint, attaches application and bearer
//! headers, and maps failure statuses to [`KiiError`] values.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Method};
use serde_json::json;

use crate::auth::{self, OAuth2Token};
use crate::config::Config;
use crate::error::{KiiError, Result};

/* --- constants ------------------------------------------------------------------------------ */

/** HTTP client timeout in seconds */
const HTTP_CLIENT_TIMEOUT_SECS: u64 = 60;

/** Content type header for JSON requests */
pub const CONTENT_TYPE_JSON: &str = "application/json";

/** token endpoint, relative to the API base */
const TOKEN_PATH: &str = "/oauth2/token";

/* --- types ----------------------------------------------------------------------------------- */

///
/// Client bound to one resolved configuration.
pub struct KiiClient<'a> {
    /** resolved configuration */
    config: &'a Config,
    /** API base URL without trailing slash */
    base_url: String,
    /** HTTP client for outgoing requests */
    http_client: Client,
}

///
/// Response body together with its status.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/* --- start of code -------------------------------------------------------------------------- */

impl<'a> KiiClient<'a> {
    ///
    /// Create a client for the configured endpoint.
    ///
    /// # Returns
    ///  * New client
    ///  * `KiiError::MissingParameter` if no endpoint can be resolved
    ///  * `KiiError::Http` if the HTTP client cannot be built
    pub fn new(config: &'a Config) -> Result<Self> {
        Self::with_http_client(config, Client::builder())
    }

    /// Create a client from a prepared HTTP client builder
    fn with_http_client(config: &'a Config, builder: ClientBuilder) -> Result<Self> {
        let base_url = config.endpoint_url()?.trim_end_matches('/').to_string();
        let http_client = builder
            .timeout(Duration::from_secs(HTTP_CLIENT_TIMEOUT_SECS))
            .build()
            .map_err(|e| KiiError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, base_url, http_client })
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    ///
    /// Join the base URL and a request path with exactly one slash.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    ///
    /// Send a request to the API.
    ///
    /// # Arguments
    ///  * `method` - HTTP method
    ///  * `path` - path relative to the API base, e.g. `/apps/<id>/buckets`
    ///  * `body` - optional request body
    ///  * `content_type` - content type for the body
    ///  * `authorized` - attach the stored bearer token
    ///
    /// # Returns
    ///  * Status and body of a successful response
    ///  * `KiiError::Auth` / `KiiError::Http` on failure statuses
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        content_type: Option<&str>,
        authorized: bool,
    ) -> Result<ApiResponse> {
        let token = if authorized {
            Some(OAuth2Token::load(OAuth2Token::path(self.config)?)?)
        } else {
            None
        };
        self.send(method, path, body, content_type, token.as_ref()).await
    }

    ///
    /// Send a request, with a bearer header when a token is given.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        content_type: Option<&str>,
        token: Option<&OAuth2Token>,
    ) -> Result<ApiResponse> {
        let headers = match token {
            Some(token) => auth::http_headers_with_authorization(self.config, content_type, token)?,
            None => auth::http_headers(self.config, content_type)?,
        };

        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.http_client.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(KiiError::Request)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(KiiError::Request)?;
        tracing::debug!("Response status: {}", status);

        check_status(status, &body)?;
        Ok(ApiResponse { status, body })
    }

    ///
    /// Obtain an admin token with the configured client credentials.
    ///
    /// # Returns
    ///  * The token returned by the server
    ///  * `KiiError::MissingParameter` if client id or secret is empty
    pub async fn login(&self) -> Result<OAuth2Token> {
        if self.config.client_id.is_empty() || self.config.client_secret.is_empty() {
            return Err(KiiError::MissingParameter(
                "missing client credentials, use --client-id/--client-secret or set \
                 KII_CLIENT_ID/KII_CLIENT_SECRET"
                    .to_string(),
            ));
        }

        let body = json!({
            "client_id": self.config.client_id,
            "client_secret": self.config.client_secret,
        });
        let response = self
            .send(Method::POST, TOKEN_PATH, Some(body.to_string()), Some(CONTENT_TYPE_JSON), None)
            .await?;

        Ok(serde_json::from_str(&response.body)?)
    }
}

///
/// Map a failure status to an error.
fn check_status(status: u16, body: &str) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => {
            tracing::error!("API rejected credentials: {}", body);
            Err(KiiError::Auth(format!(
                "Request was rejected ({}): {}\nRun 'kiicli auth login' to refresh the access token.",
                status, body
            )))
        }
        _ => {
            tracing::error!("API error ({}): {}", status, body);
            Err(KiiError::Http(format!("API returned error ({}): {}", status, body)))
        }
    }
}

/* --- tests ------------------------------------------------------------------------------- */
