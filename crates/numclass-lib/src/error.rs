use thiserror::Error;

/// Convenient result alias for the number classification library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Raised when the input is missing, empty, not a number, or negative.
    #[error("invalid number input: {}", describe_input(.input))]
    InvalidInput { input: String },

    /// Raised when building the outbound HTTP client fails.
    #[error("failed to build fact client: {message}")]
    ClientBuild { message: String },
}

impl Error {
    /// Build an [`Error::InvalidInput`] from the raw (possibly absent) input.
    pub fn invalid_input(raw: Option<&str>) -> Self {
        Error::InvalidInput {
            input: raw.unwrap_or_default().to_string(),
        }
    }

    /// Raw text that failed validation, if this is an input error.
    pub fn input(&self) -> Option<&str> {
        match self {
            Error::InvalidInput { input } => Some(input),
            _ => None,
        }
    }
}

fn describe_input(input: &str) -> String {
    if input.is_empty() {
        "<empty>".to_string()
    } else {
        format!("'{}'", input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = Error::invalid_input(Some("abc"));
        assert_eq!(err.to_string(), "invalid number input: 'abc'");
    }

    #[test]
    fn test_invalid_input_missing_is_empty() {
        let err = Error::invalid_input(None);
        assert_eq!(err.input(), Some(""));
        assert!(err.to_string().contains("<empty>"));
    }

    #[test]
    fn test_client_build_has_no_input() {
        let err = Error::ClientBuild {
            message: "tls backend".to_string(),
        };
        assert!(err.input().is_none());
        assert!(err.to_string().contains("tls backend"));
    }
}
