use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Failures inside the document pipeline, kept distinct so transfer, decode, and
/// local storage problems are logged apart. An unsupported file extension is a
/// validation rejection, not a failure, and never becomes an error value.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The remote transfer did not complete successfully.
    #[error("transfer failed: {0}")]
    Transfer(String),

    /// The downloaded bytes are not valid UTF-8 text.
    #[error("not readable text: {0}")]
    Decode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;
