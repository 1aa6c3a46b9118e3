use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store lock poisoned")]
    Poisoned,

    #[error("blocking store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("stored timestamp {0} is out of range")]
    InvalidTimestamp(i64),
}

pub type StoreResult<T> = Result<T, StoreError>;
