use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

/// Errors returned by service workflows.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("entity not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Why a fetch for a view could not be completed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The source did not answer; the user may retry.
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    /// The source answered with data that cannot be shown.
    #[error("data source returned invalid data: {0}")]
    Corrupted(String),
}

impl FetchError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FetchError::Unavailable(_))
    }
}

impl From<RepositoryError> for FetchError {
    fn from(err: RepositoryError) -> Self {
        if err.is_transient() {
            FetchError::Unavailable(err.to_string())
        } else {
            FetchError::Corrupted(err.to_string())
        }
    }
}

/// Why a store form submission did not go through.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The form failed validation before reaching the source.
    #[error("{0}")]
    Invalid(String),
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    /// The source refused the data.
    #[error("rejected by data source: {0}")]
    Rejected(String),
}

impl From<RepositoryError> for SubmitError {
    fn from(err: RepositoryError) -> Self {
        if err.is_transient() {
            SubmitError::Unavailable(err.to_string())
        } else {
            SubmitError::Rejected(err.to_string())
        }
    }
}
