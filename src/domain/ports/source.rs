use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::snapshot::DetectionSnapshot;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("detection endpoint unreachable: {0}")]
    Network(String),
    #[error("detection endpoint returned HTTP {0}")]
    Status(u16),
    #[error("invalid detection payload: {0}")]
    Parse(String),
}

#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch and parse the current detection statistics.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the endpoint cannot be reached, answers
    /// with a non-success status, or the body is not a valid payload.
    async fn fetch(&self) -> Result<DetectionSnapshot, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display() {
        let err = FetchError::Network("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "detection endpoint unreachable: connection refused"
        );

        let err = FetchError::Status(503);
        assert_eq!(err.to_string(), "detection endpoint returned HTTP 503");

        let err = FetchError::Parse("expected value".to_string());
        assert_eq!(err.to_string(), "invalid detection payload: expected value");
    }
}
