//! # Kessel Config
//!
//! Configuration management for the Kessel inventory SDK.
//!
//! A [`KesselConfig`] describes where the inventory service lives, which
//! transport security to use when talking to it, and (optionally) the OAuth2
//! client credentials used to authenticate each call. It can be created by
//! hand, with [`KesselConfigBuilder`], or loaded from JSON/TOML files and
//! environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Configuration for a Kessel inventory client
///
/// # Examples
///
/// ## Plaintext connection for local development
///
/// ```
/// use kessel_config::KesselConfig;
///
/// let config = KesselConfig::insecure("localhost:9000");
/// assert!(config.validate().is_ok());
/// ```
///
/// ## Loading from environment variables
///
/// ```no_run
/// use kessel_config::KesselConfig;
///
/// // KESSEL_ENDPOINT=inventory.example.com:443
/// // KESSEL_CA_CERT_FILE=/ca-certs/service-ca.crt
/// // KESSEL_CLIENT_ID=svc-drive
/// // KESSEL_CLIENT_SECRET=...
/// // KESSEL_TOKEN_ENDPOINT=https://sso.example.com/token
/// let config = KesselConfig::from_env_or_file("KESSEL")
///     .expect("Failed to load configuration from environment");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KesselConfig {
    /// Address of the inventory service, with or without a scheme
    pub endpoint: String,
    /// Use a plaintext channel instead of TLS
    #[serde(default)]
    pub insecure: bool,
    /// Server CA certificate bundle in PEM format
    #[serde(default)]
    pub ca_cert: Option<String>,
    /// Client certificate in PEM format, for mutual TLS
    #[serde(default)]
    pub client_cert: Option<String>,
    /// Client private key in PEM format, for mutual TLS
    #[serde(default)]
    pub client_key: Option<String>,
    /// OAuth2 client credentials attached to every call
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

/// OAuth2 client-credentials settings
///
/// Either `token_endpoint` or `issuer_url` must be set. When only the issuer
/// is known, the token endpoint is resolved through OIDC discovery at
/// connection time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub token_endpoint: Option<String>,
    #[serde(default)]
    pub issuer_url: Option<String>,
}

impl AuthConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_endpoint: Some(token_endpoint.into()),
            issuer_url: None,
        }
    }

    /// Credentials whose token endpoint is discovered from an OIDC issuer
    pub fn with_issuer(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        issuer_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_endpoint: None,
            issuer_url: Some(issuer_url.into()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.is_empty() {
            return Err(ConfigError::MissingClientId);
        }
        if self.client_secret.is_empty() {
            return Err(ConfigError::MissingClientSecret);
        }
        match (&self.token_endpoint, &self.issuer_url) {
            (None, None) => Err(ConfigError::MissingTokenEndpoint),
            (token_endpoint, issuer_url) => {
                for url in token_endpoint.iter().chain(issuer_url.iter()) {
                    if !url.starts_with("https://") && !url.starts_with("http://") {
                        return Err(ConfigError::InvalidUrl(url.clone()));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Builder for KesselConfig
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use kessel_config::{AuthConfig, KesselConfigBuilder};
///
/// let config = KesselConfigBuilder::new()
///     .endpoint("inventory.example.com:443")
///     .ca_cert("-----BEGIN CERTIFICATE-----\n...\n-----END CERTIFICATE-----")
///     .auth(AuthConfig::new("svc-drive", "secret", "https://sso.example.com/token"))
///     .build()?;
///
/// // Derive a plaintext variant for local testing
/// let local = config.to_builder().endpoint("localhost:9000").insecure(true).clear_auth().build()?;
/// assert!(local.insecure);
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug)]
pub struct KesselConfigBuilder {
    endpoint: Option<String>,
    insecure: bool,
    ca_cert: Option<String>,
    client_cert: Option<String>,
    client_key: Option<String>,
    auth: Option<AuthConfig>,
}

impl KesselConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded with an existing configuration
    pub fn from_config(config: &KesselConfig) -> Self {
        Self {
            endpoint: Some(config.endpoint.clone()),
            insecure: config.insecure,
            ca_cert: config.ca_cert.clone(),
            client_cert: config.client_cert.clone(),
            client_key: config.client_key.clone(),
            auth: config.auth.clone(),
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Set the server CA certificate (PEM content)
    pub fn ca_cert(mut self, ca_cert: impl Into<String>) -> Self {
        self.ca_cert = Some(ca_cert.into());
        self
    }

    /// Read the server CA certificate from a file
    pub fn ca_cert_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        self.ca_cert = Some(read_pem_file(path.as_ref(), "CA certificate")?);
        Ok(self)
    }

    /// Set the client certificate and key used for mutual TLS
    pub fn client_identity(mut self, cert: impl Into<String>, key: impl Into<String>) -> Self {
        self.client_cert = Some(cert.into());
        self.client_key = Some(key.into());
        self
    }

    pub fn auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn clear_auth(mut self) -> Self {
        self.auth = None;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<KesselConfig, ConfigError> {
        let config = KesselConfig {
            endpoint: self.endpoint.ok_or(ConfigError::MissingEndpoint)?,
            insecure: self.insecure,
            ca_cert: self.ca_cert,
            client_cert: self.client_cert,
            client_key: self.client_key,
            auth: self.auth,
        };

        config.validate()?;

        Ok(config)
    }
}

/// Errors that can occur when working with Kessel configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Endpoint is required but was not provided. Please specify the address of the inventory service.")]
    MissingEndpoint,

    #[error("A CA certificate is required for TLS connections. Provide one or set `insecure` for local development.")]
    MissingCaCert,

    #[error("Client certificate and client key must be provided together for mutual TLS.")]
    IncompleteIdentity,

    #[error("OAuth2 credentials cannot be sent over an insecure channel.")]
    InsecureCredentials,

    #[error("OAuth2 client id is required but was not provided.")]
    MissingClientId,

    #[error("OAuth2 client secret is required but was not provided.")]
    MissingClientSecret,

    #[error("Either a token endpoint or an issuer URL is required for OAuth2 credentials.")]
    MissingTokenEndpoint,

    #[error("Invalid URL: {0}. URLs must start with http:// or https://.")]
    InvalidUrl(String),

    #[error("Invalid certificate format: {0}. Please ensure the certificate is properly PEM-encoded.")]
    InvalidCertificate(String),

    #[error("I/O error occurred while reading configuration: {0}. Please check file permissions and paths.")]
    Io(String),

    #[error("Failed to parse configuration data: {0}. Please ensure the configuration format is correct.")]
    Parse(String),

    #[error("Global configuration has already been initialized.")]
    AlreadyInitialized,

    #[error("Environment variable error: {0}")]
    EnvVar(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Parse(error.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::Parse(error.to_string())
    }
}

impl KesselConfig {
    /// Configuration for a plaintext channel with no call credentials
    pub fn insecure(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            insecure: true,
            ..Self::default()
        }
    }

    /// Configuration for a TLS channel trusting the given CA bundle
    pub fn tls(endpoint: impl Into<String>, ca_cert: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            insecure: false,
            ca_cert: Some(ca_cert.into()),
            ..Self::default()
        }
    }

    pub fn builder() -> KesselConfigBuilder {
        KesselConfigBuilder::new()
    }

    /// Convert this configuration to a builder for modification
    pub fn to_builder(&self) -> KesselConfigBuilder {
        KesselConfigBuilder::from_config(self)
    }

    /// Create a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file_content = fs::read_to_string(path)?;
        let config: KesselConfig = serde_json::from_str(&file_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration from a TOML file
    #[cfg(feature = "toml")]
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file_content = fs::read_to_string(path)?;
        let config: KesselConfig = toml::from_str(&file_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration from environment variables
    ///
    /// The variables are named with the given prefix followed by:
    /// - ENDPOINT: address of the inventory service
    /// - INSECURE: `true`/`false` (optional, defaults to `false`)
    /// - CA_CERT: server CA certificate (content, not path)
    /// - CLIENT_CERT / CLIENT_KEY: mutual TLS identity (optional)
    /// - CLIENT_ID / CLIENT_SECRET: OAuth2 client credentials (optional)
    /// - TOKEN_ENDPOINT or ISSUER_URL: where tokens are obtained
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a required variable is missing or invalid.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        Self::load_env(prefix, false)
    }

    /// Create a configuration from environment variables or files
    ///
    /// Like [`KesselConfig::from_env`], but every PEM value may instead be
    /// given as a path in a variable with the `_FILE` suffix, for example
    /// `KESSEL_CA_CERT_FILE=/ca-certs/service-ca.crt`. The `_FILE` variant
    /// takes precedence.
    pub fn from_env_or_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::load_env(prefix, true)
    }

    fn load_env(prefix: &str, allow_files: bool) -> Result<Self, ConfigError> {
        let endpoint = required_var(&format!("{}_ENDPOINT", prefix))?;

        let insecure = match optional_var(&format!("{}_INSECURE", prefix))? {
            Some(value) => parse_bool(&value)?,
            None => false,
        };

        let pem = |name: &str, what: &str| -> Result<Option<String>, ConfigError> {
            if allow_files {
                if let Some(path) = optional_var(&format!("{}_{}_FILE", prefix, name))? {
                    return read_pem_file(Path::new(&path), what).map(Some);
                }
            }
            optional_var(&format!("{}_{}", prefix, name))
        };

        let ca_cert = pem("CA_CERT", "CA certificate")?;
        let client_cert = pem("CLIENT_CERT", "client certificate")?;
        let client_key = pem("CLIENT_KEY", "client key")?;

        let auth = match optional_var(&format!("{}_CLIENT_ID", prefix))? {
            Some(client_id) => Some(AuthConfig {
                client_id,
                client_secret: required_var(&format!("{}_CLIENT_SECRET", prefix))?,
                token_endpoint: optional_var(&format!("{}_TOKEN_ENDPOINT", prefix))?,
                issuer_url: optional_var(&format!("{}_ISSUER_URL", prefix))?,
            }),
            None => None,
        };

        let config = KesselConfig {
            endpoint,
            insecure,
            ca_cert,
            client_cert,
            client_key,
            auth,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Checks that required fields are present, that PEM material carries the
    /// expected markers and that credentials are only used over TLS.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        if self.insecure {
            if self.auth.is_some() {
                return Err(ConfigError::InsecureCredentials);
            }
        } else {
            match &self.ca_cert {
                None => return Err(ConfigError::MissingCaCert),
                Some(ca) if ca.is_empty() => return Err(ConfigError::MissingCaCert),
                Some(ca) if !ca.contains("BEGIN CERTIFICATE") => {
                    return Err(ConfigError::InvalidCertificate(
                        "CA certificate does not contain 'BEGIN CERTIFICATE' marker".to_string(),
                    ))
                }
                Some(_) => {}
            }
        }

        match (&self.client_cert, &self.client_key) {
            (None, None) => {}
            (Some(cert), Some(key)) => {
                if !cert.contains("BEGIN CERTIFICATE") {
                    return Err(ConfigError::InvalidCertificate(
                        "Client certificate does not contain 'BEGIN CERTIFICATE' marker"
                            .to_string(),
                    ));
                }
                if !key.contains("BEGIN")
                    || (!key.contains("PRIVATE KEY") && !key.contains("ENCRYPTED"))
                {
                    return Err(ConfigError::InvalidCertificate(
                        "Key does not contain proper PEM markers".to_string(),
                    ));
                }
            }
            _ => return Err(ConfigError::IncompleteIdentity),
        }

        if let Some(auth) = &self.auth {
            auth.validate()?;
        }

        Ok(())
    }
}

fn optional_var(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::EnvVar(format!("{}: {}", name, e))),
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    optional_var(name)?.ok_or_else(|| ConfigError::EnvVar(format!("{} is not set", name)))
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Parse(format!("Invalid boolean: {}", other))),
    }
}

fn read_pem_file(path: &Path, what: &str) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| {
        ConfigError::Io(format!(
            "Failed to read {} file {}: {}",
            what,
            path.display(),
            e
        ))
    })
}

// Global configuration singleton
static DEFAULT_CONFIG: OnceLock<KesselConfig> = OnceLock::new();

/// Set the default global configuration
///
/// Returns an error if a default configuration is already set.
pub fn set_default_config(config: KesselConfig) -> Result<(), ConfigError> {
    config.validate()?;
    DEFAULT_CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// Get the default global configuration, if set
pub fn get_default_config() -> Option<&'static KesselConfig> {
    DEFAULT_CONFIG.get()
}

/// Try to load a configuration from standard locations
///
/// Looks, in order, at:
/// 1. Environment variables with the prefix "KESSEL" (files allowed)
/// 2. `./kessel.json`, `~/.kessel/config.json`, `/etc/kessel/config.json`
/// 3. With the "toml" feature, the same paths with a `.toml` extension
///
/// Returns None if no valid configuration could be found.
pub fn try_load_default_config() -> Option<KesselConfig> {
    if let Ok(config) = KesselConfig::from_env_or_file("KESSEL") {
        return Some(config);
    }

    let json_paths = [
        "./kessel.json",
        "~/.kessel/config.json",
        "/etc/kessel/config.json",
    ];

    for path in json_paths.iter().filter_map(|p| expand_home(p)) {
        if path.exists() {
            if let Ok(config) = KesselConfig::from_file(&path) {
                return Some(config);
            }
        }
    }

    #[cfg(feature = "toml")]
    {
        let toml_paths = [
            "./kessel.toml",
            "~/.kessel/config.toml",
            "/etc/kessel/config.toml",
        ];

        for path in toml_paths.iter().filter_map(|p| expand_home(p)) {
            if path.exists() {
                if let Ok(config) = KesselConfig::from_toml(&path) {
                    return Some(config);
                }
            }
        }
    }

    None
}

fn expand_home(path: &str) -> Option<std::path::PathBuf> {
    match path.strip_prefix("~/") {
        Some(stripped) => dirs::home_dir().map(|home| home.join(stripped)),
        None => Some(Path::new(path).to_path_buf()),
    }
}
