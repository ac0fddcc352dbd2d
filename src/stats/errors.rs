use thiserror::Error;

use crate::sport::SportType;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("data access error: {0}")]
    DataAccess(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("no strategy registered for sport: {0}")]
    NoStrategy(SportType),
}

impl StatsError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StatsError::NotFound(what.into())
    }

    pub fn data_access(msg: impl Into<String>) -> Self {
        StatsError::DataAccess(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        StatsError::Validation(msg.into())
    }
}
