use paidmedia_plugin_api::RegistryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Invalid provider type: {0}")]
    InvalidProviderType(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

pub type DomainResult<T> = Result<T, DomainError>;
