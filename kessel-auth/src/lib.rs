//! # Kessel Auth
//!
//! Call authentication for the Kessel inventory SDK.
//!
//! - [`OAuth2ClientCredentials`]: obtains and caches access tokens with the
//!   OAuth2 client-credentials grant
//! - [`fetch_oidc_discovery`]: resolves an issuer's token endpoint
//! - [`TokenSource`]: the seam the gRPC client uses to obtain bearer tokens

mod discovery;
mod error;
mod oauth2;

pub use discovery::{fetch_oidc_discovery, fetch_oidc_discovery_with, OidcDiscoveryMetadata};
pub use error::AuthError;
pub use oauth2::{
    ClientAuthMethod, GetTokenOptions, OAuth2ClientCredentials, RefreshTokenResponse,
    DEFAULT_EXPIRES_IN, DEFAULT_REFRESH_WINDOW,
};

use async_trait::async_trait;

/// Anything that can hand out bearer tokens for outgoing calls
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return a valid access token, refreshing it first if `force_refresh`
    /// is set or the cached one is about to expire.
    async fn access_token(&self, force_refresh: bool) -> Result<String, AuthError>;
}
