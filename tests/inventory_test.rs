use async_trait::async_trait;
use kessel_sdk::v1beta2::kessel_inventory_service_server::{
    KesselInventoryService, KesselInventoryServiceServer,
};
use kessel_sdk::v1beta2::{
    check_bulk_response_pair, Allowed, CheckBulkRequest, CheckBulkRequestItem, CheckBulkResponse,
    CheckBulkResponseItem, CheckBulkResponsePair, CheckForUpdateRequest, CheckForUpdateResponse,
    CheckRequest, CheckResponse, ConsistencyToken, DeleteResourceRequest, DeleteResourceResponse,
    ReportResourceRequest, ReportResourceResponse, ReporterReference, RepresentationMetadata,
    RepresentationType, RequestPagination, ResourceReference, ResourceRepresentations,
    ResponsePagination, StreamedListObjectsRequest, StreamedListObjectsResponse, SubjectReference,
    WriteVisibility,
};
use kessel_sdk::{
    from_struct, to_struct, ApiError, ClientBuilder, InventoryClient, OAuth2ClientCredentials,
    TlsConfig,
};
use serde_json::json;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::metadata::MetadataMap;
use tonic::transport::{Certificate, Identity, Server, ServerTlsConfig};
use tonic::{Code, Request, Response, Status};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CA: &str = include_str!("../certs/ca.crt");
const SERVER_CERT: &str = include_str!("../certs/server.crt");
const SERVER_KEY: &str = include_str!("../certs/server.key");
const CLIENT_CERT: &str = include_str!("../certs/client.crt");
const CLIENT_KEY: &str = include_str!("../certs/client.key");

/// In-process inventory that records what it receives
#[derive(Default)]
struct RecordingInventory {
    authorization: Mutex<Vec<Option<String>>>,
    reports: Mutex<Vec<ReportResourceRequest>>,
    deleted: Mutex<Vec<ResourceReference>>,
    page_tokens: Mutex<Vec<Option<String>>>,
    /// (requested token, object ids, next token); `None` is the first page
    pages: Mutex<Vec<(Option<String>, Vec<&'static str>, &'static str)>>,
}

impl RecordingInventory {
    fn record(&self, metadata: &MetadataMap) {
        let value = metadata
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.authorization.lock().unwrap().push(value);
    }

    fn authorization(&self) -> Vec<Option<String>> {
        self.authorization.lock().unwrap().clone()
    }
}

fn subject_id(subject: &Option<SubjectReference>) -> &str {
    subject
        .as_ref()
        .and_then(|s| s.resource.as_ref())
        .map_or("", |r| r.resource_id.as_str())
}

fn document(id: &str) -> ResourceReference {
    ResourceReference {
        resource_type: "document".to_string(),
        resource_id: id.to_string(),
        reporter: Some(ReporterReference {
            r#type: "drive".to_string(),
            instance_id: None,
        }),
    }
}

fn principal(id: &str) -> SubjectReference {
    SubjectReference {
        relation: None,
        resource: Some(ResourceReference {
            resource_type: "principal".to_string(),
            resource_id: id.to_string(),
            reporter: Some(ReporterReference {
                r#type: "rbac".to_string(),
                instance_id: None,
            }),
        }),
    }
}

fn check_request(subject: &str) -> CheckRequest {
    CheckRequest {
        object: Some(document("doc-123")),
        relation: "view".to_string(),
        subject: Some(principal(subject)),
        consistency: None,
    }
}

fn list_request() -> StreamedListObjectsRequest {
    StreamedListObjectsRequest {
        object_type: Some(RepresentationType {
            resource_type: "document".to_string(),
            reporter_type: Some("drive".to_string()),
        }),
        relation: "view".to_string(),
        subject: Some(principal("sarah")),
        pagination: Some(RequestPagination {
            limit: 2,
            continuation_token: None,
        }),
        consistency: None,
    }
}

#[async_trait]
impl KesselInventoryService for RecordingInventory {
    async fn check(
        &self,
        request: Request<CheckRequest>,
    ) -> Result<Response<CheckResponse>, Status> {
        self.record(request.metadata());
        let request = request.into_inner();
        if subject_id(&request.subject) == "mallory" {
            return Err(Status::permission_denied("mallory may not view doc-123"));
        }
        Ok(Response::new(CheckResponse {
            allowed: Allowed::True as i32,
            consistency_token: Some(ConsistencyToken {
                token: "ct-1".to_string(),
            }),
        }))
    }

    async fn check_for_update(
        &self,
        request: Request<CheckForUpdateRequest>,
    ) -> Result<Response<CheckForUpdateResponse>, Status> {
        self.record(request.metadata());
        Err(Status::unavailable("inventory is draining"))
    }

    async fn check_bulk(
        &self,
        request: Request<CheckBulkRequest>,
    ) -> Result<Response<CheckBulkResponse>, Status> {
        self.record(request.metadata());
        let pairs = request
            .into_inner()
            .items
            .into_iter()
            .map(|item| {
                let allowed = if subject_id(&item.subject) == "sarah" {
                    Allowed::True
                } else {
                    Allowed::False
                };
                CheckBulkResponsePair {
                    request: Some(item),
                    response: Some(check_bulk_response_pair::Response::Item(
                        CheckBulkResponseItem {
                            allowed: allowed as i32,
                        },
                    )),
                }
            })
            .collect();
        Ok(Response::new(CheckBulkResponse {
            pairs,
            consistency_token: None,
        }))
    }

    async fn report_resource(
        &self,
        request: Request<ReportResourceRequest>,
    ) -> Result<Response<ReportResourceResponse>, Status> {
        self.record(request.metadata());
        self.reports.lock().unwrap().push(request.into_inner());
        Ok(Response::new(ReportResourceResponse {}))
    }

    async fn delete_resource(
        &self,
        request: Request<DeleteResourceRequest>,
    ) -> Result<Response<DeleteResourceResponse>, Status> {
        self.record(request.metadata());
        let reference = request
            .into_inner()
            .reference
            .ok_or_else(|| Status::invalid_argument("missing reference"))?;
        self.deleted.lock().unwrap().push(reference);
        Ok(Response::new(DeleteResourceResponse {}))
    }

    type StreamedListObjectsStream = tokio_stream::Iter<
        std::vec::IntoIter<Result<StreamedListObjectsResponse, Status>>,
    >;

    async fn streamed_list_objects(
        &self,
        request: Request<StreamedListObjectsRequest>,
    ) -> Result<Response<Self::StreamedListObjectsStream>, Status> {
        self.record(request.metadata());
        let token = request
            .into_inner()
            .pagination
            .and_then(|p| p.continuation_token);
        self.page_tokens.lock().unwrap().push(token.clone());

        let pages = self.pages.lock().unwrap();
        let (ids, next) = pages
            .iter()
            .find(|(requested, _, _)| *requested == token)
            .map(|(_, ids, next)| (ids.clone(), *next))
            .unwrap_or_default();

        let items: Vec<_> = ids
            .into_iter()
            .map(|id| {
                Ok(StreamedListObjectsResponse {
                    object: Some(document(id)),
                    pagination: Some(ResponsePagination {
                        continuation_token: next.to_string(),
                    }),
                    consistency_token: None,
                })
            })
            .collect();
        Ok(Response::new(tokio_stream::iter(items)))
    }
}

async fn serve(
    inventory: Arc<RecordingInventory>,
    tls: Option<ServerTlsConfig>,
) -> Result<SocketAddr, Box<dyn Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let mut server = Server::builder();
    if let Some(tls) = tls {
        server = server.tls_config(tls)?;
    }
    let router = server.add_service(KesselInventoryServiceServer::from_arc(inventory));
    tokio::spawn(router.serve_with_incoming(TcpListenerStream::new(listener)));

    Ok(addr)
}

fn server_tls() -> ServerTlsConfig {
    ServerTlsConfig::new().identity(Identity::from_pem(SERVER_CERT, SERVER_KEY))
}

async fn insecure_client(
    inventory: Arc<RecordingInventory>,
) -> Result<InventoryClient, Box<dyn Error>> {
    let addr = serve(inventory, None).await?;
    Ok(ClientBuilder::new(addr.to_string()).insecure().build()?)
}

#[tokio::test]
async fn test_report_resource_round_trip() -> Result<(), Box<dyn Error>> {
    let inventory = Arc::new(RecordingInventory::default());
    let client = insecure_client(inventory.clone()).await?;

    let request = ReportResourceRequest {
        inventory_id: None,
        r#type: "document".to_string(),
        reporter_type: "drive".to_string(),
        reporter_instance_id: "drive-1".to_string(),
        representations: Some(ResourceRepresentations {
            metadata: Some(RepresentationMetadata {
                local_resource_id: "doc-123".to_string(),
                api_href: "https://drive.example.com/api/doc-123".to_string(),
                console_href: Some("https://drive.example.com/doc-123".to_string()),
                reporter_version: Some("2.7.16".to_string()),
                transaction_id: None,
            }),
            common: Some(to_struct(json!({ "workspace_id": "6eb10953" }))?),
            reporter: Some(to_struct(json!({
                "document_id": "doc-123",
                "document_name": "My Important Document",
                "document_type": "document",
                "owner_id": "sarah"
            }))?),
        }),
        write_visibility: WriteVisibility::Immediate as i32,
    };

    client.report_resource(request.clone()).await?;

    let reports = inventory.reports.lock().unwrap().clone();
    assert_eq!(reports, vec![request]);
    assert_eq!(reports[0].write_visibility(), WriteVisibility::Immediate);
    let reporter = reports[0]
        .representations
        .as_ref()
        .and_then(|r| r.reporter.as_ref())
        .map(from_struct);
    assert_eq!(
        reporter.and_then(|r| r["document_name"].as_str().map(str::to_string)),
        Some("My Important Document".to_string())
    );

    // Plaintext channels never carry credentials
    assert_eq!(inventory.authorization(), vec![None]);

    Ok(())
}

#[tokio::test]
async fn test_check_allowed() -> Result<(), Box<dyn Error>> {
    let inventory = Arc::new(RecordingInventory::default());
    let client = insecure_client(inventory).await?;

    let response = client.check(check_request("sarah")).await?;
    assert_eq!(response.allowed(), Allowed::True);
    assert_eq!(
        response.consistency_token.map(|t| t.token),
        Some("ct-1".to_string())
    );

    Ok(())
}

#[tokio::test]
async fn test_server_status_is_classified() -> Result<(), Box<dyn Error>> {
    let inventory = Arc::new(RecordingInventory::default());
    let client = insecure_client(inventory).await?;

    let err = client.check(check_request("mallory")).await.unwrap_err();
    assert!(err.is_permission_denied());
    assert_eq!(err.code(), Some(Code::PermissionDenied));
    assert_eq!(
        err.status().map(|s| s.message()),
        Some("mallory may not view doc-123")
    );

    let err = client
        .check_for_update(CheckForUpdateRequest {
            object: Some(document("doc-123")),
            relation: "edit".to_string(),
            subject: Some(principal("sarah")),
        })
        .await
        .unwrap_err();
    assert!(err.is_unavailable());
    assert!(matches!(err, ApiError::Unavailable(_)));

    Ok(())
}

#[tokio::test]
async fn test_check_bulk_and_delete() -> Result<(), Box<dyn Error>> {
    let inventory = Arc::new(RecordingInventory::default());
    let client = insecure_client(inventory.clone()).await?;

    let items = ["sarah", "mallory"]
        .iter()
        .map(|subject| CheckBulkRequestItem {
            object: Some(document("doc-123")),
            relation: "view".to_string(),
            subject: Some(principal(subject)),
        })
        .collect();
    let response = client
        .check_bulk(CheckBulkRequest {
            items,
            consistency: None,
        })
        .await?;

    let decisions: Vec<_> = response
        .pairs
        .iter()
        .map(|pair| match &pair.response {
            Some(check_bulk_response_pair::Response::Item(item)) => item.allowed(),
            _ => Allowed::Unspecified,
        })
        .collect();
    assert_eq!(decisions, vec![Allowed::True, Allowed::False]);

    client
        .delete_resource(DeleteResourceRequest {
            reference: Some(document("doc-123")),
        })
        .await?;
    assert_eq!(
        inventory.deleted.lock().unwrap().clone(),
        vec![document("doc-123")]
    );

    Ok(())
}

#[tokio::test]
async fn test_list_objects_follows_continuation_tokens() -> Result<(), Box<dyn Error>> {
    let inventory = Arc::new(RecordingInventory::default());
    *inventory.pages.lock().unwrap() = vec![
        (None, vec!["doc-1", "doc-2"], "page-2"),
        (Some("page-2".to_string()), vec!["doc-3"], ""),
    ];
    let client = insecure_client(inventory.clone()).await?;

    let objects = client.list_objects(list_request()).await?;

    let ids: Vec<_> = objects.iter().map(|o| o.resource_id.as_str()).collect();
    assert_eq!(ids, vec!["doc-1", "doc-2", "doc-3"]);
    assert_eq!(
        inventory.page_tokens.lock().unwrap().clone(),
        vec![None, Some("page-2".to_string())]
    );

    Ok(())
}

#[tokio::test]
async fn test_list_objects_stops_on_cycling_tokens() -> Result<(), Box<dyn Error>> {
    let inventory = Arc::new(RecordingInventory::default());
    *inventory.pages.lock().unwrap() = vec![
        (None, vec!["doc-1"], "a"),
        (Some("a".to_string()), vec!["doc-2"], "b"),
        (Some("b".to_string()), vec!["doc-3"], "a"),
    ];
    let client = insecure_client(inventory.clone()).await?;

    let objects = client.list_objects(list_request()).await?;

    assert_eq!(objects.len(), 3);
    assert_eq!(inventory.page_tokens.lock().unwrap().len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_bearer_token_reaches_the_server() -> Result<(), Box<dyn Error>> {
    let token_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "inventory-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&token_server)
        .await;

    let inventory = Arc::new(RecordingInventory::default());
    let addr = serve(inventory.clone(), Some(server_tls())).await?;

    let credentials = OAuth2ClientCredentials::new(
        "svc-drive",
        "secret",
        format!("{}/token", token_server.uri()),
    );
    let client = ClientBuilder::new(addr.to_string())
        .oauth2_client_authenticated(credentials, TlsConfig::new(CA).with_domain_name("localhost"))
        .build()?;

    client.check(check_request("sarah")).await?;
    client.list_objects(list_request()).await?;

    assert_eq!(
        inventory.authorization(),
        vec![
            Some("Bearer inventory-token".to_string()),
            Some("Bearer inventory-token".to_string()),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_mutual_tls_presents_client_identity() -> Result<(), Box<dyn Error>> {
    let inventory = Arc::new(RecordingInventory::default());
    let tls = server_tls().client_ca_root(Certificate::from_pem(CA));
    let addr = serve(inventory, Some(tls)).await?;

    let client = ClientBuilder::new(addr.to_string())
        .unauthenticated(
            TlsConfig::new(CA)
                .with_client_identity(CLIENT_CERT, CLIENT_KEY)
                .with_domain_name("localhost"),
        )
        .build()?;
    let response = client.check(check_request("sarah")).await?;
    assert_eq!(response.allowed(), Allowed::True);

    // Without an identity the handshake is refused
    let anonymous = ClientBuilder::new(addr.to_string())
        .unauthenticated(TlsConfig::new(CA).with_domain_name("localhost"))
        .build()?;
    assert!(anonymous.check(check_request("sarah")).await.is_err());

    Ok(())
}
