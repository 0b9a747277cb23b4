use thiserror::Error as ThisError;

/// Failures surfaced by the route engine. None of these are retried.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum RouteError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("point not found: {0}")]
    NotFound(String),
    #[error("no path between {origin} and {destination}")]
    NoPath { origin: String, destination: String },
    #[error("point data unavailable: {0}")]
    DataUnavailable(String),
}

pub type Result<T> = std::result::Result<T, RouteError>;

impl RouteError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable(message.into())
    }
}
