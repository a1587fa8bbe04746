use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("SDK error: {0}")]
    Sdk(#[from] kessel_sdk::SdkError),

    #[error("{0}")]
    Api(#[from] kessel_sdk::ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] kessel_sdk::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
