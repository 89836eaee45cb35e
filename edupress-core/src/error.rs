use thiserror::Error;

#[derive(Error, Debug)]
pub enum PressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// The content source returned nothing usable. The cause is logged
    /// where it is detected.
    #[error("generation failed")]
    GenerationFailed,

    #[error("Storage full: {needed} bytes needed, {available} bytes available")]
    CapacityExceeded { needed: u64, available: u64 },

    #[error("Unsupported document: {0}")]
    UnsupportedDocument(String),

    #[error("Read-only document: {0}")]
    ReadOnly(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, PressError>;
