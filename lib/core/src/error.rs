use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("Property not found: {0}")]
    MissingProperty(String),

    #[error("Attribute is read-only: {0}")]
    ReadOnlyAttribute(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unexpected element type: expected {expected}, got {actual}")]
    UnexpectedElementType { expected: String, actual: String },

    #[error("No index attached to proxy for {0}")]
    IndexNotAttached(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// True for the "element absent on server" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
