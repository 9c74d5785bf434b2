use crate::diff::Diff;
use thiserror::Error;

/// Result type alias using DeepCmpError
pub type Result<T> = std::result::Result<T, DeepCmpError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Two values were expected to be deeply equal but are not
    NotEqual,
    /// Comparator configuration could not be parsed
    InvalidConfig,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotEqual => "ERR_NOT_EQUAL",
            ErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
        }
    }
}

/// Errors reported by the deepcmp facade
///
/// Comparison itself never fails; differences are data. Errors arise only
/// where a caller asks for equality to hold or hands in a bad configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeepCmpError {
    #[error("values are not deeply equal:\n{diff:#}")]
    NotEqual { diff: Diff },

    #[error("invalid comparator config: {reason}")]
    InvalidConfig { reason: String },
}

impl DeepCmpError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeepCmpError::NotEqual { .. } => ErrorKind::NotEqual,
            DeepCmpError::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// The differences behind a `NotEqual` error
    pub fn diff(&self) -> Option<&Diff> {
        match self {
            DeepCmpError::NotEqual { diff } => Some(diff),
            DeepCmpError::InvalidConfig { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{messages, Difference};

    #[test]
    fn test_kind_codes_are_distinct() {
        assert_ne!(ErrorKind::NotEqual.code(), ErrorKind::InvalidConfig.code());
    }

    #[test]
    fn test_not_equal_display_is_verbose() {
        let err = DeepCmpError::NotEqual {
            diff: Diff::single(Difference::new(messages::INT_NOT_EQUAL, "1", "2")),
        };
        assert_eq!(
            err.to_string(),
            "values are not deeply equal:\n.: int not equal\n\tv1=1\n\tv2=2"
        );
        assert_eq!(err.diff().map(|d| d.len()), Some(1));
    }
}
