use kessel_sdk::v1beta2::{CheckRequest, ReporterReference, ResourceReference, SubjectReference};
use kessel_sdk::{
    client_from_config, connect_from_config, resolve_token_endpoint, ApiError, AuthConfig,
    ClientBuilder, KesselConfig, OAuth2ClientCredentials, SdkError, TlsConfig,
};
use serde_json::json;
use std::error::Error;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CA: &str = include_str!("../certs/ca.crt");

fn check_request() -> CheckRequest {
    CheckRequest {
        object: Some(ResourceReference {
            resource_type: "document".to_string(),
            resource_id: "doc-123".to_string(),
            reporter: Some(ReporterReference {
                r#type: "drive".to_string(),
                instance_id: None,
            }),
        }),
        relation: "view".to_string(),
        subject: Some(SubjectReference {
            relation: None,
            resource: Some(ResourceReference {
                resource_type: "principal".to_string(),
                resource_id: "sarah".to_string(),
                reporter: Some(ReporterReference {
                    r#type: "rbac".to_string(),
                    instance_id: None,
                }),
            }),
        }),
        consistency: None,
    }
}

#[tokio::test]
async fn test_resolve_token_endpoint_with_discovery() -> Result<(), Box<dyn Error>> {
    let mock_server = MockServer::start().await;
    let issuer = format!("{}/realms/redhat-external", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/realms/redhat-external/.well-known/openid-configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issuer": issuer,
            "token_endpoint": format!("{}/protocol/openid-connect/token", issuer)
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = KesselConfig::tls("inventory.example.com:443", CA);
    config.auth = Some(AuthConfig::with_issuer("svc-drive", "secret", issuer.clone()));

    // Issuer-only credentials cannot build a client directly
    assert!(client_from_config(&config).is_err());

    let resolved = resolve_token_endpoint(&config).await?;
    assert_eq!(
        resolved.auth.as_ref().and_then(|a| a.token_endpoint.clone()),
        Some(format!("{}/protocol/openid-connect/token", issuer))
    );

    let client = client_from_config(&resolved)?;
    assert!(client.is_authenticated());

    Ok(())
}

#[tokio::test]
async fn test_connect_from_config_reports_unreachable_service() {
    let config = KesselConfig::insecure("127.0.0.1:1");

    match connect_from_config(&config).await {
        Err(SdkError::Api(ApiError::Transport(_))) => {}
        other => panic!("Expected transport error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_token_is_fetched_before_each_call() -> Result<(), Box<dyn Error>> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "inventory-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let credentials =
        OAuth2ClientCredentials::new("svc-drive", "secret", format!("{}/token", mock_server.uri()));

    let client = ClientBuilder::new("127.0.0.1:1")
        .oauth2_client_authenticated(credentials, TlsConfig::new(CA))
        .connect_timeout(Duration::from_secs(2))
        .build()?;

    // Nothing listens on the inventory port, but the token is obtained first
    // and then served from the cache on the second attempt
    let first = client.check(check_request()).await.unwrap_err();
    let second = client.check(check_request()).await.unwrap_err();
    assert!(!matches!(first, ApiError::Auth(_)));
    assert!(!matches!(second, ApiError::Auth(_)));

    Ok(())
}

#[tokio::test]
async fn test_token_failure_stops_the_call() -> Result<(), Box<dyn Error>> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client"
        })))
        .mount(&mock_server)
        .await;

    let credentials =
        OAuth2ClientCredentials::new("svc-drive", "wrong", format!("{}/token", mock_server.uri()));

    let client = ClientBuilder::new("127.0.0.1:1")
        .oauth2_client_authenticated(credentials, TlsConfig::new(CA))
        .build()?;

    let err = client.check(check_request()).await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(_)));
    assert_eq!(err.code(), None);

    Ok(())
}
