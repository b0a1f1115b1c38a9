use thiserror::Error;
use type_mapping::ScalarConversionError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Table '{0}' already exists")]
    SchemaConflict(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("row".to_string()),
            sqlx::Error::Configuration(e) => StoreError::Configuration(e.to_string()),
            other => StoreError::DatabaseError(other.to_string()),
        }
    }
}

impl From<crate::validation::ValidationError> for StoreError {
    fn from(err: crate::validation::ValidationError) -> Self {
        StoreError::ValidationError(err.to_string())
    }
}

impl From<ScalarConversionError> for StoreError {
    fn from(err: ScalarConversionError) -> Self {
        StoreError::SerializationError(err.to_string())
    }
}
