//! Report a resource over TLS with OAuth2 client-credentials authentication.
//!
//! Expects `CLIENT_ID`, `CLIENT_SECRET`, `KESSEL_ENDPOINT` and either
//! `TOKEN_ENDPOINT` or `ISSUER_URL` in the environment. The server CA is read
//! from `CA_CERT_PATH`, defaulting to `/ca-certs/service-ca.crt`.

use kessel_sdk::v1beta2::{ReportResourceRequest, RepresentationMetadata, ResourceRepresentations};
use kessel_sdk::{
    configure_tls, fetch_oidc_discovery, to_struct, ClientBuilder, OAuth2ClientCredentials,
};
use serde_json::json;
use std::env;
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CA_PATH: &str = "/ca-certs/service-ca.crt";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client_id = env::var("CLIENT_ID")?;
    let client_secret = env::var("CLIENT_SECRET")?;
    let endpoint = env::var("KESSEL_ENDPOINT")?;

    let token_endpoint = match env::var("TOKEN_ENDPOINT") {
        Ok(token_endpoint) => token_endpoint,
        Err(_) => {
            let discovery = fetch_oidc_discovery(&env::var("ISSUER_URL")?).await?;
            discovery.token_endpoint
        }
    };

    let credentials = OAuth2ClientCredentials::new(client_id, client_secret, token_endpoint);

    let ca_path = env::var("CA_CERT_PATH").unwrap_or_else(|_| DEFAULT_CA_PATH.to_string());
    let tls = configure_tls(&ca_path)?;

    let client = ClientBuilder::new(endpoint)
        .oauth2_client_authenticated(credentials, tls)
        .build()?;

    let report = ReportResourceRequest {
        r#type: "document".to_string(),
        reporter_type: "drive".to_string(),
        reporter_instance_id: "drive-1".to_string(),
        representations: Some(ResourceRepresentations {
            metadata: Some(RepresentationMetadata {
                local_resource_id: "doc-123".to_string(),
                api_href: "https://drive.example.com/document/123".to_string(),
                ..Default::default()
            }),
            common: Some(to_struct(json!({ "workspace_id": "workspace-1" }))?),
            reporter: None,
        }),
        ..Default::default()
    };

    match client.report_resource(report).await {
        Ok(_) => println!("Successfully reported resource"),
        Err(e) => {
            eprintln!("gRPC error: {}", e);
            return Err(e.into());
        }
    }

    client.close();
    Ok(())
}
