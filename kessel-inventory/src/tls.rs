//! Transport security for the inventory channel.

use crate::error::ApiError;
use std::fs;
use std::io::BufReader;
use std::path::Path;
use tonic::transport::{Certificate, ClientTlsConfig, Identity};
use tracing::debug;

/// TLS settings for a secure channel
///
/// The server certificate is verified against the given CA bundle only.
/// A client identity turns the connection into mutual TLS.
///
/// ```no_run
/// # fn main() -> Result<(), kessel_inventory::ApiError> {
/// use kessel_inventory::{configure_tls, TlsConfig};
///
/// let tls = configure_tls("/ca-certs/service-ca.crt")?;
///
/// let mtls = TlsConfig::new(std::fs::read_to_string("ca.crt").unwrap_or_default())
///     .with_client_identity("<client cert pem>", "<client key pem>")
///     .with_domain_name("inventory.example.com");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TlsConfig {
    ca_cert: String,
    client_identity: Option<(String, String)>,
    domain_name: Option<String>,
}

impl TlsConfig {
    pub fn new(ca_cert: impl Into<String>) -> Self {
        Self {
            ca_cert: ca_cert.into(),
            client_identity: None,
            domain_name: None,
        }
    }

    /// Present a client certificate and private key (PEM) to the server
    pub fn with_client_identity(mut self, cert: impl Into<String>, key: impl Into<String>) -> Self {
        self.client_identity = Some((cert.into(), key.into()));
        self
    }

    /// Verify the server certificate against this name instead of the endpoint host
    pub fn with_domain_name(mut self, domain_name: impl Into<String>) -> Self {
        self.domain_name = Some(domain_name.into());
        self
    }

    pub fn ca_cert(&self) -> &str {
        &self.ca_cert
    }

    pub fn has_client_identity(&self) -> bool {
        self.client_identity.is_some()
    }

    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    pub(crate) fn to_client_tls_config(&self) -> Result<ClientTlsConfig, ApiError> {
        if count_certificates(&self.ca_cert) == 0 {
            return Err(ApiError::TlsConfig(
                "failed to add server CA certificate".to_string(),
            ));
        }

        let mut tls = ClientTlsConfig::new().ca_certificate(Certificate::from_pem(&self.ca_cert));

        if let Some((cert, key)) = &self.client_identity {
            if count_certificates(cert) == 0 {
                return Err(ApiError::TlsConfig(
                    "client certificate does not contain a PEM certificate".to_string(),
                ));
            }
            match rustls_pemfile::private_key(&mut cert_reader(key)) {
                Ok(Some(_)) => {}
                _ => {
                    return Err(ApiError::TlsConfig(
                        "client key does not contain a PEM private key".to_string(),
                    ))
                }
            }
            tls = tls.identity(Identity::from_pem(cert, key));
        }

        if let Some(domain_name) = &self.domain_name {
            tls = tls.domain_name(domain_name.clone());
        }

        Ok(tls)
    }
}

fn cert_reader(pem: &str) -> BufReader<&[u8]> {
    BufReader::new(pem.as_bytes())
}

/// Number of certificates that decode from a PEM bundle, zero when any block is malformed
fn count_certificates(pem: &str) -> usize {
    rustls_pemfile::certs(&mut cert_reader(pem))
        .collect::<Result<Vec<_>, _>>()
        .map_or(0, |certs| certs.len())
}

/// Load a server CA bundle from disk into a [`TlsConfig`]
pub fn configure_tls(ca_path: impl AsRef<Path>) -> Result<TlsConfig, ApiError> {
    let ca_path = ca_path.as_ref();
    debug!(path = %ca_path.display(), "loading server CA certificate");

    let ca_cert = fs::read_to_string(ca_path).map_err(|e| {
        ApiError::TlsConfig(format!(
            "failed to read the ca cert file {}: {}",
            ca_path.display(),
            e
        ))
    })?;

    let tls = TlsConfig::new(ca_cert);
    tls.to_client_tls_config()?;
    Ok(tls)
}
