use codevision_domain::ProjectError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Refusing to persist invalid project: {0}")]
    InvalidProject(#[from] ProjectError),

    #[error("Invalid store key: {0}")]
    InvalidKey(String),
}
