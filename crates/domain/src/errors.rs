use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RelayError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid upstream address: {0}")]
    InvalidServerAddress(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
