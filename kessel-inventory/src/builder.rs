use crate::client::InventoryClient;
use crate::error::ApiError;
use crate::tls::TlsConfig;
use kessel_auth::{OAuth2ClientCredentials, TokenSource};
use kessel_config::{ConfigError, KesselConfig};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tonic::transport::Endpoint;
use tracing::{debug, info};

#[derive(Clone)]
enum TransportMode {
    Insecure,
    Tls {
        tls: TlsConfig,
        credentials: Option<Arc<dyn TokenSource>>,
    },
}

impl fmt::Debug for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Insecure => f.write_str("Insecure"),
            TransportMode::Tls { tls, credentials } => f
                .debug_struct("Tls")
                .field("tls", tls)
                .field("authenticated", &credentials.is_some())
                .finish(),
        }
    }
}

/// Builder for [`InventoryClient`]
///
/// A transport mode must be selected before building: [`insecure`],
/// [`unauthenticated`] or one of the authenticated variants. Selecting a mode
/// replaces any previous one, so `insecure()` also drops call credentials.
///
/// ```no_run
/// # async fn example() -> Result<(), kessel_inventory::ApiError> {
/// use kessel_auth::OAuth2ClientCredentials;
/// use kessel_inventory::{configure_tls, ClientBuilder};
///
/// let local = ClientBuilder::new("localhost:9000").insecure().build()?;
///
/// let credentials = OAuth2ClientCredentials::new("svc-drive", "secret", "https://sso.example.com/token");
/// let remote = ClientBuilder::new("inventory.example.com:443")
///     .oauth2_client_authenticated(credentials, configure_tls("/ca-certs/service-ca.crt")?)
///     .connect()
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// [`insecure`]: ClientBuilder::insecure
/// [`unauthenticated`]: ClientBuilder::unauthenticated
#[derive(Clone, Debug)]
pub struct ClientBuilder {
    endpoint: String,
    mode: Option<TransportMode>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            mode: None,
            timeout: None,
            connect_timeout: None,
        }
    }

    /// Create a builder from a validated configuration
    ///
    /// Credentials that only name an OIDC issuer need their token endpoint
    /// resolved first; the facade's `connect_from_config` does this.
    pub fn from_config(config: &KesselConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let builder = Self::new(config.endpoint.clone());
        if config.insecure {
            return Ok(builder.insecure());
        }

        let ca_cert = config.ca_cert.clone().ok_or(ConfigError::MissingCaCert)?;
        let mut tls = TlsConfig::new(ca_cert);
        if let (Some(cert), Some(key)) = (&config.client_cert, &config.client_key) {
            tls = tls.with_client_identity(cert.clone(), key.clone());
        }

        match &config.auth {
            None => Ok(builder.unauthenticated(tls)),
            Some(auth) => {
                let token_endpoint = auth
                    .token_endpoint
                    .clone()
                    .ok_or(ConfigError::MissingTokenEndpoint)?;
                let credentials = OAuth2ClientCredentials::new(
                    auth.client_id.clone(),
                    auth.client_secret.clone(),
                    token_endpoint,
                );
                Ok(builder.oauth2_client_authenticated(credentials, tls))
            }
        }
    }

    /// Plaintext HTTP/2 without call credentials, for local development
    pub fn insecure(mut self) -> Self {
        self.mode = Some(TransportMode::Insecure);
        self
    }

    /// TLS without call credentials
    pub fn unauthenticated(mut self, tls: TlsConfig) -> Self {
        self.mode = Some(TransportMode::Tls {
            tls,
            credentials: None,
        });
        self
    }

    /// TLS with a bearer token from `token_source` on every call
    pub fn authenticated(mut self, token_source: Arc<dyn TokenSource>, tls: TlsConfig) -> Self {
        self.mode = Some(TransportMode::Tls {
            tls,
            credentials: Some(token_source),
        });
        self
    }

    pub fn oauth2_client_authenticated(
        self,
        credentials: OAuth2ClientCredentials,
        tls: TlsConfig,
    ) -> Self {
        self.authenticated(Arc::new(credentials), tls)
    }

    /// Deadline applied to each call
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn is_insecure(&self) -> bool {
        matches!(self.mode, Some(TransportMode::Insecure))
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(
            self.mode,
            Some(TransportMode::Tls {
                credentials: Some(_),
                ..
            })
        )
    }

    /// Build a client whose channel connects on first use
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(self) -> Result<InventoryClient, ApiError> {
        let (endpoint, credentials) = self.into_endpoint()?;
        let address = endpoint.uri().to_string();
        let channel = endpoint.connect_lazy();
        debug!(%address, "created lazy inventory channel");
        Ok(InventoryClient::new(channel, credentials, address))
    }

    /// Build a client and establish the connection before returning
    pub async fn connect(self) -> Result<InventoryClient, ApiError> {
        let (endpoint, credentials) = self.into_endpoint()?;
        let address = endpoint.uri().to_string();
        let channel = endpoint.connect().await?;
        info!(%address, "connected to inventory service");
        Ok(InventoryClient::new(channel, credentials, address))
    }

    fn into_endpoint(self) -> Result<(Endpoint, Option<Arc<dyn TokenSource>>), ApiError> {
        let mode = self.mode.ok_or(ApiError::MissingTransportMode)?;

        let secure = matches!(mode, TransportMode::Tls { .. });
        let address = normalize_endpoint(&self.endpoint, secure)?;

        let mut endpoint = Endpoint::from_shared(address.clone())
            .map_err(|e| ApiError::InvalidEndpoint(format!("{}: {}", address, e)))?;

        if let Some(timeout) = self.timeout {
            endpoint = endpoint.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            endpoint = endpoint.connect_timeout(timeout);
        }

        match mode {
            TransportMode::Insecure => Ok((endpoint, None)),
            TransportMode::Tls { tls, credentials } => {
                let endpoint = endpoint
                    .tls_config(tls.to_client_tls_config()?)
                    .map_err(|e| ApiError::TlsConfig(e.to_string()))?;
                Ok((endpoint, credentials))
            }
        }
    }
}

/// Add the scheme matching the transport mode when the endpoint has none
fn normalize_endpoint(endpoint: &str, secure: bool) -> Result<String, ApiError> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(ApiError::InvalidEndpoint(
            "endpoint must not be empty".to_string(),
        ));
    }

    if endpoint.starts_with("http://") {
        if secure {
            return Err(ApiError::InvalidEndpoint(format!(
                "{} uses http:// but TLS was requested",
                endpoint
            )));
        }
        return Ok(endpoint.to_string());
    }

    if endpoint.starts_with("https://") {
        if !secure {
            return Err(ApiError::InvalidEndpoint(format!(
                "{} uses https:// but the channel is insecure",
                endpoint
            )));
        }
        return Ok(endpoint.to_string());
    }

    if endpoint.contains("://") {
        return Err(ApiError::InvalidEndpoint(format!(
            "unsupported scheme in {}",
            endpoint
        )));
    }

    let scheme = if secure { "https" } else { "http" };
    Ok(format!("{}://{}", scheme, endpoint))
}
