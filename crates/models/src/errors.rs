use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Connection could not be acquired or was lost mid-transaction.
    #[error("database unavailable: {0}")]
    Unavailable(String),
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("inconsistent state: {0}")]
    Inconsistent(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg))
            | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return ModelError::Constraint(msg),
            _ => {}
        }
        match e {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ModelError::Unavailable(e.to_string()),
            other => ModelError::Db(other.to_string()),
        }
    }
}
