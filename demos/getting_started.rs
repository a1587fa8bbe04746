//! Report a resource and check a relation over a plaintext local channel.
//!
//! Run with an inventory service listening on localhost:9000:
//!
//! ```text
//! cargo run --example getting_started
//! ```

use kessel_sdk::v1beta2::{
    CheckRequest, ReportResourceRequest, ReporterReference, RepresentationMetadata,
    ResourceReference, ResourceRepresentations, SubjectReference,
};
use kessel_sdk::{to_struct, ClientBuilder};
use serde_json::json;
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const KESSEL_ENDPOINT: &str = "localhost:9000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // For insecure local development
    let client = ClientBuilder::new(KESSEL_ENDPOINT).insecure().build()?;

    let common = to_struct(json!({ "workspace_id": "6eb10953-4ec9-4feb-838f-ba43a60880bf" }))?;
    let reporter = to_struct(json!({
        "document_id": "doc-123",
        "document_name": "My Important Document",
        "document_type": "presentation",
        "created_at": "2025-08-31T10:30:00Z",
        "file_size": 2048576,
        "owner_id": "user-456"
    }))?;

    let report = ReportResourceRequest {
        r#type: "document".to_string(),
        reporter_type: "drive".to_string(),
        reporter_instance_id: "drive-1".to_string(),
        representations: Some(ResourceRepresentations {
            metadata: Some(RepresentationMetadata {
                local_resource_id: "doc-123".to_string(),
                api_href: "https://drive.example.com/document/123".to_string(),
                console_href: Some("https://www.console.com/drive/documents".to_string()),
                reporter_version: Some("2.7.16".to_string()),
                transaction_id: None,
            }),
            common: Some(common),
            reporter: Some(reporter),
        }),
        ..Default::default()
    };

    client.report_resource(report).await?;
    println!("Resource reported successfully");

    // Replication may take a moment before the check sees the new resource
    let check = CheckRequest {
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
    };

    let result = client.check(check).await;
    client.close();

    match result {
        Ok(response) => {
            println!("Check response received successfully");
            println!("Allowed: {}", response.allowed().as_str_name());
            Ok(())
        }
        Err(e) => {
            let kind = if e.is_unavailable() {
                "Service unavailable"
            } else if e.is_permission_denied() {
                "Permission denied"
            } else if e.code().is_some() {
                "gRPC connection error"
            } else {
                "Unknown error"
            };
            match e.status() {
                Some(status) => eprintln!("{}: {}", kind, status.message()),
                None => eprintln!("{}: {}", kind, e),
            }
            Err(e.into())
        }
    }
}
