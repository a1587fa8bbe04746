mod checks;
mod resources;

pub use checks::{handle_check, handle_check_for_update, handle_list_objects};
pub use resources::{handle_delete, handle_report, ReportOptions};

use crate::cli::ConnectionArgs;
use crate::error::{CliError, Result};
use kessel_sdk::{connect_from_config, try_load_default_config, AuthConfig, InventoryClient, KesselConfig};
use tracing::{debug, warn};

/// Resolve the configuration from a config file, the command-line flags or
/// the standard locations, in that order
pub fn load_config(args: &ConnectionArgs) -> Result<KesselConfig> {
    if let Some(path) = &args.config {
        debug!(path = %path.display(), "loading configuration file");
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => KesselConfig::from_toml(path)?,
            _ => KesselConfig::from_file(path)?,
        };
        return Ok(config);
    }

    let Some(endpoint) = &args.endpoint else {
        return try_load_default_config().ok_or_else(|| {
            CliError::InvalidInput(
                "No endpoint given. Use --endpoint, --config or KESSEL_ENDPOINT.".to_string(),
            )
        });
    };

    let mut builder = KesselConfig::builder()
        .endpoint(endpoint.clone())
        .insecure(args.insecure);

    if let Some(ca_cert) = &args.ca_cert {
        builder = builder.ca_cert_file(ca_cert)?;
    }

    if let Some(client_id) = &args.client_id {
        if args.insecure {
            warn!("ignoring OAuth2 credentials on an insecure channel");
        } else {
            let client_secret = args.client_secret.clone().ok_or_else(|| {
                CliError::InvalidInput("--client-secret is required with --client-id".to_string())
            })?;
            builder = builder.auth(AuthConfig {
                client_id: client_id.clone(),
                client_secret,
                token_endpoint: args.token_endpoint.clone(),
                issuer_url: args.issuer_url.clone(),
            });
        }
    }

    Ok(builder.build()?)
}

pub async fn connect(args: &ConnectionArgs) -> Result<InventoryClient> {
    let config = load_config(args)?;
    Ok(connect_from_config(&config).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_config_from_flags() {
        let args = ConnectionArgs {
            endpoint: Some("localhost:9000".to_string()),
            insecure: true,
            client_id: Some("svc-drive".to_string()),
            ..Default::default()
        };
        let config = load_config(&args).unwrap();
        assert!(config.insecure);
        assert!(config.auth.is_none());
    }

    #[test]
    fn test_load_config_requires_secret() {
        let dir = tempfile::tempdir().unwrap();
        let ca_path = dir.path().join("ca.crt");
        fs::write(&ca_path, include_str!("../../../certs/ca.crt")).unwrap();

        let args = ConnectionArgs {
            endpoint: Some("inventory.example.com:443".to_string()),
            ca_cert: Some(ca_path),
            client_id: Some("svc-drive".to_string()),
            token_endpoint: Some("https://sso.example.com/token".to_string()),
            ..Default::default()
        };
        assert!(matches!(load_config(&args), Err(CliError::InvalidInput(_))));

        let args = ConnectionArgs {
            client_secret: Some("secret".to_string()),
            ..args
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.auth.unwrap().client_id, "svc-drive");
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kessel.toml");
        fs::write(&path, "endpoint = \"localhost:9000\"\ninsecure = true\n").unwrap();

        let args = ConnectionArgs {
            config: Some(path),
            endpoint: Some("ignored:1".to_string()),
            ..Default::default()
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.endpoint, "localhost:9000");
    }
}
