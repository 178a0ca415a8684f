use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username and password must not be empty")]
    Validation,
    #[error("user '{0}' already exists")]
    DuplicateUser(String),
    #[error("wrong username or password")]
    Authentication,
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not create data directory: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("quiz is not finished yet")]
    NotComplete,
    #[error("quiz score was already recorded")]
    AlreadyFinalized,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
