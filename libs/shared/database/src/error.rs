use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("Query against {collection} failed with HTTP {status}: {message}")]
    QueryFailed {
        collection: String,
        status: u16,
        message: String,
    },

    #[error("Document in {collection} could not be decoded: {message}")]
    Decode { collection: String, message: String },

    #[error("Invalid request header: {0}")]
    InvalidHeader(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
