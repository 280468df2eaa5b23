use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolistraError>;

#[derive(Debug, Error)]
pub enum SolistraError {
    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
