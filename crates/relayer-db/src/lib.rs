pub mod config;
pub mod models;
pub mod pool;
pub mod repositories;

pub use config::DatabaseConfig;
pub use pool::DatabasePool;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database configuration error: {0}")]
    Config(String),

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Stored value could not be decoded: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        DatabaseError::Query(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::Migration(err.to_string())
    }
}

impl From<DatabaseError> for relayer_core::RelayerError {
    fn from(err: DatabaseError) -> Self {
        relayer_core::RelayerError::Store(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
