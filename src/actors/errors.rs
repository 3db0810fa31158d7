use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Report view has shut down")]
    Closed,
    #[error("Report view task did not shut down gracefully: {0}")]
    Crashed(#[from] JoinError)
}
