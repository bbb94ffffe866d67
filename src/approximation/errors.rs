use std::fmt;

/// Error types for approximant construction, evaluation and persistence
#[derive(Debug)]
pub enum ApproxError {
    /// basis/coefficient length disagreement, or point length != number of variables
    DimensionMismatch(String),
    /// out-of-range variable index or an otherwise unusable argument
    InvalidArgument(String),
    /// basis-size product does not fit in usize
    Overflow(String),
    /// persisted bytes malformed or truncated
    Deserialization(String),
    /// filesystem failure while saving or loading
    Io(std::io::Error),
}

impl fmt::Display for ApproxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApproxError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {}", msg),
            ApproxError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ApproxError::Overflow(msg) => write!(f, "Overflow: {}", msg),
            ApproxError::Deserialization(msg) => write!(f, "Deserialization failed: {}", msg),
            ApproxError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for ApproxError {}

impl From<std::io::Error> for ApproxError {
    fn from(err: std::io::Error) -> Self {
        ApproxError::Io(err)
    }
}
