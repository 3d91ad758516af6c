use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("The HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The report endpoint responded with HTTP status {0}")]
    HttpStatus(u16),

    #[error("The report endpoint returned an unsuccessful response (status {status:?})")]
    Unsuccessful { status: Option<i64> },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Failed to read the trade report file: {0}")]
    Io(#[from] std::io::Error),
}
