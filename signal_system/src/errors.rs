use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Sync manager not started")]
    NotStarted,

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Observer failed: {0}")]
    Observer(#[from] anyhow::Error),
}
