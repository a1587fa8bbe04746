//! # Kessel SDK
//!
//! A Rust client library for the Kessel inventory service.
//!
//! The SDK reports resources to the inventory and asks it authorization
//! questions ("does this subject have this relation to this object?") over
//! gRPC. Channels can be plaintext for local development, TLS (optionally
//! mutual TLS), or TLS with OAuth2 client-credentials call credentials.
//!
//! This crate combines functionality from:
//! - `kessel-config`: Configuration management
//! - `kessel-auth`: OAuth2 client credentials and OIDC discovery
//! - `kessel-inventory`: gRPC client for the inventory service
//!
//! ## Feature Flags
//!
//! - `toml`: Enables configuration loading from TOML files
//!
//! ## Basic Usage
//!
//! ```no_run
//! use kessel_sdk::v1beta2::{CheckRequest, ReporterReference, ResourceReference, SubjectReference};
//! use kessel_sdk::{ApiError, ClientBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new("localhost:9000").insecure().build()?;
//!
//! let request = CheckRequest {
//!     object: Some(ResourceReference {
//!         resource_type: "document".to_string(),
//!         resource_id: "doc-123".to_string(),
//!         reporter: Some(ReporterReference { r#type: "drive".to_string(), instance_id: None }),
//!     }),
//!     relation: "view".to_string(),
//!     subject: Some(SubjectReference {
//!         relation: None,
//!         resource: Some(ResourceReference {
//!             resource_type: "principal".to_string(),
//!             resource_id: "sarah".to_string(),
//!             reporter: Some(ReporterReference { r#type: "rbac".to_string(), instance_id: None }),
//!         }),
//!     }),
//!     consistency: None,
//! };
//!
//! match client.check(request).await {
//!     Ok(response) => println!("allowed: {:?}", response.allowed()),
//!     Err(e) if e.is_unavailable() => eprintln!("Service unavailable: {}", e),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```no_run
//! use kessel_sdk::{connect_from_config, KesselConfig};
//!
//! # async fn example() -> Result<(), kessel_sdk::SdkError> {
//! // KESSEL_ENDPOINT, KESSEL_CA_CERT_FILE, KESSEL_CLIENT_ID, KESSEL_CLIENT_SECRET,
//! // and KESSEL_TOKEN_ENDPOINT or KESSEL_ISSUER_URL
//! let config = KesselConfig::from_env_or_file("KESSEL")?;
//! let client = connect_from_config(&config).await?;
//! # Ok(())
//! # }
//! ```

use thiserror::Error;
use tracing::debug;

pub use kessel_config::{
    get_default_config, set_default_config, try_load_default_config, AuthConfig, ConfigError,
    KesselConfig, KesselConfigBuilder,
};

pub use kessel_auth::{
    fetch_oidc_discovery, fetch_oidc_discovery_with, AuthError, ClientAuthMethod, GetTokenOptions, OAuth2ClientCredentials,
    OidcDiscoveryMetadata, RefreshTokenResponse, TokenSource,
};

pub use kessel_inventory::{
    configure_tls, from_struct, google, to_struct, v1beta2, ApiError, ClientBuilder, Code,
    InventoryClient, TlsConfig,
};

/// Errors that can occur in the Kessel SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// API error
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fill in the token endpoint of issuer-only credentials through OIDC discovery
///
/// Configurations without credentials, or whose token endpoint is already
/// known, are returned unchanged.
pub async fn resolve_token_endpoint(config: &KesselConfig) -> Result<KesselConfig, SdkError> {
    let mut resolved = config.clone();

    if let Some(auth) = resolved.auth.as_mut() {
        if auth.token_endpoint.is_none() {
            let issuer = auth
                .issuer_url
                .as_deref()
                .ok_or(ConfigError::MissingTokenEndpoint)?;
            let discovery = fetch_oidc_discovery(issuer).await?;
            debug!(token_endpoint = %discovery.token_endpoint, "resolved token endpoint");
            auth.token_endpoint = Some(discovery.token_endpoint);
        }
    }

    Ok(resolved)
}

/// Create a lazily-connecting client from a configuration
///
/// Issuer-only credentials are rejected here; use [`connect_from_config`].
pub fn client_from_config(config: &KesselConfig) -> Result<InventoryClient, SdkError> {
    Ok(ClientBuilder::from_config(config)?.build()?)
}

/// Resolve credentials and connect to the inventory service described by `config`
pub async fn connect_from_config(config: &KesselConfig) -> Result<InventoryClient, SdkError> {
    let config = resolve_token_endpoint(config).await?;
    Ok(ClientBuilder::from_config(&config)?.connect().await?)
}
