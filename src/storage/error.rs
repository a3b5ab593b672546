use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("playlist {0:?} not found")]
    PlaylistNotFound(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
