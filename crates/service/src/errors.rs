use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Unavailable(_) => 2001,
            ServiceError::Db(_) => 2002,
            ServiceError::Model(m) => match m {
                ModelError::Unavailable(_) => 2102,
                ModelError::Constraint(_) => 2103,
                ModelError::Db(_) => 2104,
                ModelError::Inconsistent(_) => 2105,
            },
        }
    }

    /// True when the backing store could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ServiceError::Unavailable(_) | ServiceError::Model(ModelError::Unavailable(_)))
    }
}
