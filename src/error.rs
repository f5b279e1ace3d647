use std::fmt;

/// Result type for Verdict operations
pub type Result<T> = std::result::Result<T, VerdictError>;

/// Main error type for the Verdict trainer
#[derive(Debug, Clone)]
pub enum VerdictError {
    /// Invalid dimensions for operations
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    /// Invalid parameter value
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// IO errors (file operations)
    IoError(String),

    /// Serialization/deserialization errors
    SerializationError(String),

    /// Malformed corpus data
    DataError(String),

    /// Environment constructed over an empty sample pool
    EmptyPool(String),

    /// Invalid action
    InvalidAction {
        action: usize,
        max_actions: usize,
    },

    /// Training error
    TrainingError(String),
}

impl fmt::Display for VerdictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, actual)
            }
            VerdictError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            VerdictError::IoError(msg) => write!(f, "IO error: {}", msg),
            VerdictError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            VerdictError::DataError(msg) => write!(f, "Data error: {}", msg),
            VerdictError::EmptyPool(msg) => write!(f, "Empty pool: {}", msg),
            VerdictError::InvalidAction { action, max_actions } => {
                write!(f, "Invalid action {}: must be less than {}", action, max_actions)
            }
            VerdictError::TrainingError(msg) => write!(f, "Training error: {}", msg),
        }
    }
}

impl std::error::Error for VerdictError {}

// Conversion from std::io::Error
impl From<std::io::Error> for VerdictError {
    fn from(err: std::io::Error) -> Self {
        VerdictError::IoError(err.to_string())
    }
}

// Conversion from bincode::Error
impl From<bincode::Error> for VerdictError {
    fn from(err: bincode::Error) -> Self {
        VerdictError::SerializationError(err.to_string())
    }
}

// Helper functions for common error patterns
impl VerdictError {
    pub fn dimension_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        VerdictError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        VerdictError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
