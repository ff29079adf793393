use thiserror::Error;

/// Application-level errors (command-line layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] classbook_service::error::ServiceError),

    #[error("Malformed request: {0}")]
    RequestError(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
