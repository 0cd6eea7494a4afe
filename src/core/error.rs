use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while converting a batch.
#[derive(Error, Debug)]
pub enum InfluxConvError {
    /// The input file could not be read
    #[error("Failed to read input {}: {source}", .path.display())]
    Input {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying read failure
        #[source]
        source: std::io::Error,
    },

    /// One or more input lines are not valid line protocol
    #[error("Decode error: {0}")]
    Decode(String),

    /// A field value of a single point could not be converted
    #[error("Invalid field '{field}': {message}")]
    Field {
        /// Field key
        field: String,
        /// What went wrong
        message: String,
    },

    /// Writing the exposition failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid run configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, InfluxConvError>;

impl InfluxConvError {
    /// Creates a new input error for the given path
    pub fn input<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }

    /// Creates a new decode error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Creates a new field error
    pub fn field<F: Into<String>, S: Into<String>>(field: F, msg: S) -> Self {
        Self::Field {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Creates a new serialization error
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if the run can continue past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Field { .. })
    }

    /// Returns the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Input { .. } => "io",
            Self::Decode(_) => "decode",
            Self::Field { .. } => "field",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = InfluxConvError::decode("unable to parse 'cpu'");
        assert_eq!(err.to_string(), "Decode error: unable to parse 'cpu'");
        assert_eq!(err.category(), "decode");
    }

    #[test]
    fn test_error_recoverability() {
        assert!(InfluxConvError::field("value", "out of range").is_recoverable());
        assert!(!InfluxConvError::decode("bad line").is_recoverable());
        assert!(!InfluxConvError::serialization("broken pipe").is_recoverable());
    }

    #[test]
    fn test_input_error_names_path() {
        let err = InfluxConvError::input(
            "/no/such/file",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "Failed to read input /no/such/file: not found");
        assert_eq!(err.category(), "io");
    }
}
