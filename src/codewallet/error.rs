use crate::tags::ValidationError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Fragment not found: {0}")]
    FragmentNotFound(Uuid),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl WalletError {
    /// True for the "referenced something that does not exist" family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WalletError::FragmentNotFound(_) | WalletError::TagNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
