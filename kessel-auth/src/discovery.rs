use crate::error::AuthError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const WELL_KNOWN_PATH: &str = ".well-known/openid-configuration";

/// The subset of OpenID provider metadata the SDK cares about
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OidcDiscoveryMetadata {
    pub issuer: String,
    pub token_endpoint: String,
    #[serde(default)]
    pub authorization_endpoint: Option<String>,
    #[serde(default)]
    pub jwks_uri: Option<String>,
    #[serde(default)]
    pub grant_types_supported: Vec<String>,
    #[serde(default)]
    pub token_endpoint_auth_methods_supported: Vec<String>,
}

/// Fetch the OpenID provider metadata of an issuer
///
/// ```no_run
/// # async fn example() -> Result<(), kessel_auth::AuthError> {
/// use kessel_auth::{fetch_oidc_discovery, OAuth2ClientCredentials};
///
/// let discovery = fetch_oidc_discovery("https://sso.example.com/realms/redhat-external").await?;
/// let credentials = OAuth2ClientCredentials::new("svc-drive", "secret", discovery.token_endpoint);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_oidc_discovery(issuer_url: &str) -> Result<OidcDiscoveryMetadata, AuthError> {
    fetch_oidc_discovery_with(&reqwest::Client::new(), issuer_url).await
}

/// Like [`fetch_oidc_discovery`], using a preconfigured HTTP client,
/// e.g. one trusting a private CA
#[instrument(skip(http))]
pub async fn fetch_oidc_discovery_with(
    http: &reqwest::Client,
    issuer_url: &str,
) -> Result<OidcDiscoveryMetadata, AuthError> {
    if !issuer_url.starts_with("https://") && !issuer_url.starts_with("http://") {
        return Err(AuthError::Config(format!(
            "Issuer URL must start with http:// or https://: {}",
            issuer_url
        )));
    }

    let url = format!("{}/{}", issuer_url.trim_end_matches('/'), WELL_KNOWN_PATH);
    debug!(%url, "fetching OIDC discovery document");

    let response = http.get(&url).send().await.map_err(AuthError::HttpClient)?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(AuthError::Discovery(format!(
            "HTTP error: {} - {}",
            status, error_text
        )));
    }

    let metadata = response
        .json::<OidcDiscoveryMetadata>()
        .await
        .map_err(|e| AuthError::Discovery(format!("Failed to parse response: {}", e)))?;

    if metadata.token_endpoint.is_empty() {
        return Err(AuthError::Discovery(
            "Discovery document has an empty token_endpoint".to_string(),
        ));
    }

    Ok(metadata)
}
