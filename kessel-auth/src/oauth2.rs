//! OAuth2 client-credentials grant with an in-memory token cache.

use crate::error::AuthError;
use crate::TokenSource;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::fmt;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Lifetime assumed for tokens whose response carries no `expires_in`, in seconds
pub const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Tokens closer than this to their expiry are refreshed, in seconds
pub const DEFAULT_REFRESH_WINDOW: u64 = 300;

/// How the client authenticates itself to the token endpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClientAuthMethod {
    /// `client_id` and `client_secret` as form parameters
    #[default]
    RequestBody,
    /// HTTP Basic authentication header
    Basic,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GetTokenOptions {
    /// Ignore any cached token and request a new one
    pub force_refresh: bool,
}

/// An access token and the instant it stops being valid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenEndpointResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// OAuth2 client credentials
///
/// Tokens are requested on first use and reused until they come within the
/// refresh window of their expiry. Concurrent callers share one refresh.
///
/// ```no_run
/// # async fn example() -> Result<(), kessel_auth::AuthError> {
/// use kessel_auth::{GetTokenOptions, OAuth2ClientCredentials};
///
/// let credentials = OAuth2ClientCredentials::new(
///     "svc-drive",
///     "secret",
///     "https://sso.example.com/realms/redhat-external/protocol/openid-connect/token",
/// );
/// let token = credentials.get_token(GetTokenOptions::default()).await?;
/// println!("token valid until {}", token.expires_at);
/// # Ok(())
/// # }
/// ```
pub struct OAuth2ClientCredentials {
    client_id: String,
    client_secret: String,
    token_endpoint: String,
    auth_method: ClientAuthMethod,
    scopes: Vec<String>,
    refresh_window: Duration,
    http: reqwest::Client,
    cached: Mutex<Option<RefreshTokenResponse>>,
}

impl fmt::Debug for OAuth2ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_endpoint", &self.token_endpoint)
            .field("auth_method", &self.auth_method)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl OAuth2ClientCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_endpoint: token_endpoint.into(),
            auth_method: ClientAuthMethod::default(),
            scopes: Vec::new(),
            refresh_window: Duration::seconds(DEFAULT_REFRESH_WINDOW as i64),
            http: reqwest::Client::new(),
            cached: Mutex::new(None),
        }
    }

    pub fn with_auth_method(mut self, auth_method: ClientAuthMethod) -> Self {
        self.auth_method = auth_method;
        self
    }

    /// Request the given scopes, sent space-separated
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_refresh_window(mut self, refresh_window: Duration) -> Self {
        self.refresh_window = refresh_window;
        self
    }

    /// Use a preconfigured HTTP client, e.g. one trusting a private CA
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }

    /// Get a valid access token, from the cache when possible
    #[instrument(skip(self), fields(client_id = %self.client_id))]
    pub async fn get_token(
        &self,
        options: GetTokenOptions,
    ) -> Result<RefreshTokenResponse, AuthError> {
        let mut cached = self.cached.lock().await;

        if !options.force_refresh {
            if let Some(token) = cached.as_ref() {
                if self.is_fresh(token, Utc::now()) {
                    debug!("using cached access token");
                    return Ok(token.clone());
                }
            }
        }

        let token = self.request_token().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    fn is_fresh(&self, token: &RefreshTokenResponse, now: DateTime<Utc>) -> bool {
        token.expires_at - self.refresh_window > now
    }

    async fn request_token(&self) -> Result<RefreshTokenResponse, AuthError> {
        let mut params: Vec<(&str, String)> =
            vec![("grant_type", "client_credentials".to_string())];
        if !self.scopes.is_empty() {
            params.push(("scope", self.scopes.join(" ")));
        }

        let mut request = self
            .http
            .post(&self.token_endpoint)
            .header(ACCEPT, "application/json");

        request = match self.auth_method {
            ClientAuthMethod::RequestBody => {
                params.push(("client_id", self.client_id.clone()));
                params.push(("client_secret", self.client_secret.clone()));
                request
            }
            ClientAuthMethod::Basic => request.basic_auth(&self.client_id, Some(&self.client_secret)),
        };

        debug!(token_endpoint = %self.token_endpoint, "requesting access token");
        let response = request
            .form(&params)
            .send()
            .await
            .map_err(AuthError::HttpClient)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(TokenErrorResponse {
                    error,
                    error_description: Some(description),
                }) => format!("{}: {}", error, description),
                Ok(TokenErrorResponse { error, .. }) => error,
                Err(_) => body,
            };
            warn!(%status, "token endpoint rejected the request");
            return Err(AuthError::TokenRequest(format!(
                "HTTP error: {} - {}",
                status, detail
            )));
        }

        let body = response
            .json::<TokenEndpointResponse>()
            .await
            .map_err(|e| AuthError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if body.access_token.is_empty() {
            return Err(AuthError::InvalidResponse(
                "Response contains an empty access_token".to_string(),
            ));
        }
        if let Some(token_type) = body.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                warn!(token_type, "unexpected token type, sending as bearer");
            }
        }

        let lifetime = body.expires_in.unwrap_or(DEFAULT_EXPIRES_IN).min(u32::MAX as u64);
        let expires_at = Utc::now() + Duration::seconds(lifetime as i64);
        debug!(%expires_at, "access token obtained");

        Ok(RefreshTokenResponse {
            access_token: body.access_token,
            expires_at,
        })
    }
}

#[async_trait]
impl TokenSource for OAuth2ClientCredentials {
    async fn access_token(&self, force_refresh: bool) -> Result<String, AuthError> {
        let token = self.get_token(GetTokenOptions { force_refresh }).await?;
        Ok(token.access_token)
    }
}
