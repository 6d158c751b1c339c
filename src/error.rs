//! Dashboard error types

use crate::client::ClientError;
use crate::clipboard::ClipboardError;
use crate::config::ConfigError;
use crate::session::StorageError;
use thiserror::Error;

/// Errors surfaced by dashboard actions that do not go to the error slot
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The requested copy target does not exist in the current summary
    #[error("Nothing to copy: {0}")]
    NothingToCopy(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::NothingToCopy("link 3".to_string());
        assert_eq!(err.to_string(), "Nothing to copy: link 3");

        let err: DashboardError = ClientError::Timeout.into();
        assert_eq!(err.to_string(), "Request timeout");
    }
}
