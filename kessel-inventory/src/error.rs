use kessel_auth::AuthError;
use kessel_config::ConfigError;
use thiserror::Error;
use tonic::{Code, Status};

/// Errors returned by the inventory client
///
/// Failed calls are classified by their gRPC status code so callers can
/// branch on the cases they handle without inspecting the status itself.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Service unavailable: {}", .0.message())]
    Unavailable(Status),

    #[error("Permission denied: {}", .0.message())]
    PermissionDenied(Status),

    #[error("Unauthenticated: {}", .0.message())]
    Unauthenticated(Status),

    #[error("gRPC error ({}): {}", .0.code(), .0.message())]
    Rpc(Status),

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    #[error("No transport mode selected; call insecure(), unauthenticated() or authenticated() on the builder")]
    MissingTransportMode,

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<Status> for ApiError {
    fn from(status: Status) -> Self {
        match status.code() {
            Code::Unavailable => ApiError::Unavailable(status),
            Code::PermissionDenied => ApiError::PermissionDenied(status),
            Code::Unauthenticated => ApiError::Unauthenticated(status),
            _ => ApiError::Rpc(status),
        }
    }
}

impl ApiError {
    /// The gRPC status returned by the service, if the call reached it
    pub fn status(&self) -> Option<&Status> {
        match self {
            ApiError::Unavailable(status)
            | ApiError::PermissionDenied(status)
            | ApiError::Unauthenticated(status)
            | ApiError::Rpc(status) => Some(status),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<Code> {
        self.status().map(Status::code)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ApiError::Unavailable(_))
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ApiError::PermissionDenied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let error = ApiError::from(Status::unavailable("connection refused"));
        assert!(error.is_unavailable());
        assert_eq!(error.code(), Some(Code::Unavailable));
        assert_eq!(error.to_string(), "Service unavailable: connection refused");

        let error = ApiError::from(Status::permission_denied("no access"));
        assert!(error.is_permission_denied());
        assert!(!error.is_unavailable());

        let error = ApiError::from(Status::unauthenticated("bad token"));
        assert!(matches!(error, ApiError::Unauthenticated(_)));

        let error = ApiError::from(Status::invalid_argument("missing object"));
        assert!(matches!(error, ApiError::Rpc(_)));
        assert_eq!(error.code(), Some(Code::InvalidArgument));
    }

    #[test]
    fn test_non_status_errors_have_no_code() {
        let error = ApiError::InvalidEndpoint("".to_string());
        assert_eq!(error.code(), None);
        assert!(error.status().is_none());

        let error = ApiError::from(AuthError::TokenRequest("HTTP error: 401".to_string()));
        assert!(matches!(error, ApiError::Auth(_)));
        assert_eq!(error.code(), None);
    }
}
