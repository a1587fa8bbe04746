use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Token request error: {0}")]
    TokenRequest(String),

    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    #[error("OIDC discovery error: {0}")]
    Discovery(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
