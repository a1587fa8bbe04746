use crate::error::ApiError;
use crate::v1beta2::kessel_inventory_service_client::KesselInventoryServiceClient;
use crate::v1beta2::{
    CheckBulkRequest, CheckBulkResponse, CheckForUpdateRequest, CheckForUpdateResponse,
    CheckRequest, CheckResponse, DeleteResourceRequest, DeleteResourceResponse,
    ReportResourceRequest, ReportResourceResponse, RequestPagination, ResourceReference,
    StreamedListObjectsRequest, StreamedListObjectsResponse,
};
use kessel_auth::TokenSource;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::Channel;
use tonic::{Request, Streaming};
use tracing::{debug, info, instrument};

/// Client for the Kessel inventory service
///
/// Cloning is cheap and clones share the underlying connection. Create one
/// with [`ClientBuilder`](crate::ClientBuilder).
#[derive(Clone)]
pub struct InventoryClient {
    inner: KesselInventoryServiceClient<Channel>,
    credentials: Option<Arc<dyn TokenSource>>,
    endpoint: String,
}

impl fmt::Debug for InventoryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryClient")
            .field("endpoint", &self.endpoint)
            .field("authenticated", &self.credentials.is_some())
            .finish()
    }
}

impl InventoryClient {
    pub(crate) fn new(
        channel: Channel,
        credentials: Option<Arc<dyn TokenSource>>,
        endpoint: String,
    ) -> Self {
        Self {
            inner: KesselInventoryServiceClient::new(channel),
            credentials,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Report a resource and its reporter-supplied attributes
    #[instrument(skip_all, fields(resource_type = %request.r#type, reporter = %request.reporter_type))]
    pub async fn report_resource(
        &self,
        request: ReportResourceRequest,
    ) -> Result<ReportResourceResponse, ApiError> {
        let request = self.prepare(request).await?;
        let response = self.inner.clone().report_resource(request).await?;
        info!("resource reported");
        Ok(response.into_inner())
    }

    /// Ask whether the subject has `relation` on the object
    #[instrument(skip_all, fields(relation = %request.relation))]
    pub async fn check(&self, request: CheckRequest) -> Result<CheckResponse, ApiError> {
        let request = self.prepare(request).await?;
        let response = self.inner.clone().check(request).await?.into_inner();
        debug!(allowed = response.allowed().as_str_name(), "check completed");
        Ok(response)
    }

    /// Like [`check`](Self::check), but always evaluated against the latest state
    #[instrument(skip_all, fields(relation = %request.relation))]
    pub async fn check_for_update(
        &self,
        request: CheckForUpdateRequest,
    ) -> Result<CheckForUpdateResponse, ApiError> {
        let request = self.prepare(request).await?;
        let response = self.inner.clone().check_for_update(request).await?.into_inner();
        debug!(allowed = response.allowed().as_str_name(), "check for update completed");
        Ok(response)
    }

    #[instrument(skip_all, fields(items = request.items.len()))]
    pub async fn check_bulk(&self, request: CheckBulkRequest) -> Result<CheckBulkResponse, ApiError> {
        let request = self.prepare(request).await?;
        let response = self.inner.clone().check_bulk(request).await?.into_inner();
        debug!(pairs = response.pairs.len(), "bulk check completed");
        Ok(response)
    }

    #[instrument(skip_all)]
    pub async fn delete_resource(
        &self,
        request: DeleteResourceRequest,
    ) -> Result<DeleteResourceResponse, ApiError> {
        if request.reference.is_none() {
            return Err(ApiError::InvalidRequest(
                "delete requires a resource reference".to_string(),
            ));
        }
        let request = self.prepare(request).await?;
        let response = self.inner.clone().delete_resource(request).await?;
        info!("resource deleted");
        Ok(response.into_inner())
    }

    /// Open a server stream of the objects the subject has `relation` on
    #[instrument(skip_all, fields(relation = %request.relation))]
    pub async fn streamed_list_objects(
        &self,
        request: StreamedListObjectsRequest,
    ) -> Result<Streaming<StreamedListObjectsResponse>, ApiError> {
        let request = self.prepare(request).await?;
        let response = self.inner.clone().streamed_list_objects(request).await?;
        Ok(response.into_inner())
    }

    /// Collect every object across pages by following continuation tokens
    ///
    /// Stops when a page yields nothing or carries no continuation token that
    /// has not already been requested.
    pub async fn list_objects(
        &self,
        mut request: StreamedListObjectsRequest,
    ) -> Result<Vec<ResourceReference>, ApiError> {
        let mut objects = Vec::new();
        let mut seen: HashSet<String> = request
            .pagination
            .as_ref()
            .and_then(|p| p.continuation_token.clone())
            .into_iter()
            .collect();

        loop {
            let mut stream = self.streamed_list_objects(request.clone()).await?;
            let mut received = 0usize;
            let mut last_token = None;

            while let Some(item) = stream.next().await {
                let item = item?;
                received += 1;
                if let Some(object) = item.object {
                    objects.push(object);
                }
                if let Some(pagination) = item.pagination {
                    if !pagination.continuation_token.is_empty() {
                        last_token = Some(pagination.continuation_token);
                    }
                }
            }

            match next_page_token(&mut seen, last_token, received) {
                Some(token) => {
                    debug!(received, "fetching next page");
                    let limit = request.pagination.as_ref().map_or(0, |p| p.limit);
                    request.pagination = Some(RequestPagination {
                        limit,
                        continuation_token: Some(token),
                    });
                }
                None => break,
            }
        }

        Ok(objects)
    }

    /// Release the connection
    ///
    /// Dropping the last clone has the same effect.
    pub fn close(self) {
        debug!(endpoint = %self.endpoint, "closing inventory client");
    }

    async fn prepare<T>(&self, message: T) -> Result<Request<T>, ApiError> {
        let mut request = Request::new(message);

        if let Some(source) = &self.credentials {
            let token = source.access_token(false).await?;
            let mut value: MetadataValue<Ascii> = format!("Bearer {}", token)
                .parse()
                .map_err(|_| {
                    ApiError::InvalidRequest(
                        "access token is not a valid header value".to_string(),
                    )
                })?;
            value.set_sensitive(true);
            request.metadata_mut().insert("authorization", value);
        }

        Ok(request)
    }
}

fn next_page_token(
    seen: &mut HashSet<String>,
    last: Option<String>,
    received: usize,
) -> Option<String> {
    if received == 0 {
        return None;
    }
    last.filter(|token| seen.insert(token.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientBuilder, TlsConfig};
    use async_trait::async_trait;
    use kessel_auth::AuthError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CA: &str = include_str!("../../certs/ca.crt");

    struct CountingToken {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenSource for CountingToken {
        async fn access_token(&self, _force_refresh: bool) -> Result<String, AuthError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("token-{}", n))
        }
    }

    struct FailingToken;

    #[async_trait]
    impl TokenSource for FailingToken {
        async fn access_token(&self, _force_refresh: bool) -> Result<String, AuthError> {
            Err(AuthError::TokenRequest("HTTP error: 401".to_string()))
        }
    }

    fn check_request() -> CheckRequest {
        CheckRequest {
            relation: "view".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_bearer_token_attached_per_call() {
        let source = Arc::new(CountingToken {
            calls: AtomicUsize::new(0),
        });
        let client = ClientBuilder::new("inventory.example.com:443")
            .authenticated(source.clone(), TlsConfig::new(CA))
            .build()
            .unwrap();

        let first = client.prepare(check_request()).await.unwrap();
        let second = client.prepare(check_request()).await.unwrap();

        assert_eq!(
            first.metadata().get("authorization").unwrap().to_str().unwrap(),
            "Bearer token-1"
        );
        assert_eq!(
            second.metadata().get("authorization").unwrap().to_str().unwrap(),
            "Bearer token-2"
        );
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_insecure_client_sends_no_authorization() {
        let client = ClientBuilder::new("localhost:9000").insecure().build().unwrap();
        let request = client.prepare(check_request()).await.unwrap();
        assert!(request.metadata().get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_token_failure_surfaces_as_auth_error() {
        let client = ClientBuilder::new("inventory.example.com:443")
            .authenticated(Arc::new(FailingToken), TlsConfig::new(CA))
            .build()
            .unwrap();

        let err = client.check(check_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[tokio::test]
    async fn test_delete_requires_reference() {
        let client = ClientBuilder::new("localhost:9000").insecure().build().unwrap();
        let err = client
            .delete_resource(DeleteResourceRequest { reference: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_debug_hides_credentials() {
        let client = ClientBuilder::new("inventory.example.com:443")
            .authenticated(Arc::new(FailingToken), TlsConfig::new(CA))
            .build()
            .unwrap();
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("authenticated: true"));
        client.close();
    }

    #[test]
    fn test_next_page_token() {
        let mut seen = HashSet::new();
        assert_eq!(next_page_token(&mut seen, Some("p2".to_string()), 10), Some("p2".to_string()));
        assert_eq!(next_page_token(&mut seen, Some("p2".to_string()), 10), None);
        assert_eq!(next_page_token(&mut seen, Some("p3".to_string()), 10), Some("p3".to_string()));
        assert_eq!(next_page_token(&mut seen, None, 10), None);
        assert_eq!(next_page_token(&mut seen, Some("p4".to_string()), 0), None);
    }

    #[test]
    fn test_next_page_token_stops_on_cycle() {
        let mut seen = HashSet::new();
        assert_eq!(next_page_token(&mut seen, Some("a".to_string()), 1), Some("a".to_string()));
        assert_eq!(next_page_token(&mut seen, Some("b".to_string()), 1), Some("b".to_string()));
        assert_eq!(next_page_token(&mut seen, Some("a".to_string()), 1), None);
    }
}
