use kessel_sdk::{
    client_from_config, get_default_config, set_default_config, try_load_default_config,
    AuthConfig, KesselConfig,
};
use std::env;
use std::error::Error;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Example 1: Creating configuration manually
    println!("Example 1: Creating configuration manually");
    let manual_config = KesselConfig::insecure("localhost:9000");

    let _client = client_from_config(&manual_config)?;
    println!("Client created from manual configuration");

    // Example 2: Using the builder with TLS and OAuth2 credentials
    println!("\nExample 2: Using the builder");
    let built_config = KesselConfig::builder()
        .endpoint("inventory.example.com:443")
        .ca_cert(include_str!("../certs/ca.crt"))
        .auth(AuthConfig::new(
            "svc-drive",
            "secret",
            "https://sso.example.com/realms/redhat-external/protocol/openid-connect/token",
        ))
        .build()?;
    println!("  Endpoint: {}", built_config.endpoint);
    println!("  Authenticated: {}", built_config.auth.is_some());

    // Example 3: Loading configuration from a JSON file
    println!("\nExample 3: Loading configuration from a JSON file");

    let temp_dir = tempfile::tempdir()?;
    let file_path = temp_dir.path().join("kessel.json");

    let config_json = r#"{
        "endpoint": "localhost:9081",
        "insecure": true
    }"#;

    fs::write(&file_path, config_json)?;

    let json_config = KesselConfig::from_file(&file_path)?;
    println!("Configuration loaded from JSON file:");
    println!("  Endpoint: {}", json_config.endpoint);
    println!("  Insecure: {}", json_config.insecure);

    // Example 4: Loading from environment variables, with the CA read from a file
    println!("\nExample 4: Loading from environment variables");

    let ca_path = temp_dir.path().join("service-ca.crt");
    fs::write(&ca_path, include_str!("../certs/ca.crt"))?;

    env::set_var("DEMO_ENDPOINT", "inventory.example.com:443");
    env::set_var("DEMO_CA_CERT_FILE", &ca_path);
    env::set_var("DEMO_CLIENT_ID", "svc-drive");
    env::set_var("DEMO_CLIENT_SECRET", "secret");
    env::set_var(
        "DEMO_ISSUER_URL",
        "https://sso.example.com/realms/redhat-external",
    );

    let env_config = KesselConfig::from_env_or_file("DEMO")?;
    println!("Configuration loaded from environment variables:");
    println!("  Endpoint: {}", env_config.endpoint);
    if let Some(auth) = &env_config.auth {
        println!("  Client id: {}", auth.client_id);
        println!("  Issuer: {:?}", auth.issuer_url);
    }

    // Example 5: Default configuration
    println!("\nExample 5: Default configuration");
    match try_load_default_config() {
        Some(config) => println!("Found configuration for {}", config.endpoint),
        None => println!("No configuration in the standard locations"),
    }

    set_default_config(json_config)?;
    if let Some(config) = get_default_config() {
        println!("Default configuration points at {}", config.endpoint);
    }

    Ok(())
}
