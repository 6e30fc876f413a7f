/// Error Module
///
/// The crate-wide error type. Every variant maps onto exactly one
/// [`ExceptionKind`] so callers can match on the DB-API hierarchy
/// (for example, handle every `DatabaseError` subkind in one arm)
/// instead of on individual variants.
use crate::core::db::environment::EnvironmentError;
use crate::core::taxonomy::{ExceptionKind, TaxonomyError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OdbcError {
    /// Neither a connection string nor any string keyword was supplied
    #[error("no connection information was supplied")]
    NoConnectionInfo,

    /// A non-reserved keyword carried something other than text
    #[error("keyword '{keyword}' must be a string, not {found}")]
    KeywordNotString { keyword: String, found: &'static str },

    /// The `timeout` keyword could not be read as an integer
    #[error("timeout value is not integer-like: {value}")]
    TimeoutNotInteger { value: String },

    /// The `timeout` keyword was an integer the driver cannot accept
    #[error("timeout value {value} is out of range")]
    TimeoutOutOfRange { value: i64 },

    /// A *FromTicks conversion received something that is not a number
    #[error("{function} requires a number")]
    TicksNotNumeric { function: &'static str },

    /// A *FromTicks conversion received a number outside the calendar range
    #[error("ticks value {ticks} is out of range")]
    TicksOutOfRange { ticks: f64 },

    /// Failure reported by the driver manager or a driver
    #[error("[{sqlstate}] {message}")]
    Driver {
        kind: ExceptionKind,
        sqlstate: String,
        message: String,
    },

    /// The process-wide environment could not be prepared
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// The exception hierarchy failed to register
    #[error("exception taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OdbcError {
    /// Builds a driver error, classifying it by SQLSTATE.
    pub fn driver(sqlstate: impl Into<String>, message: impl Into<String>) -> Self {
        let sqlstate = sqlstate.into();
        OdbcError::Driver {
            kind: ExceptionKind::from_sqlstate(&sqlstate),
            sqlstate,
            message: message.into(),
        }
    }

    /// The taxonomy kind this error is raised as.
    pub fn kind(&self) -> ExceptionKind {
        match self {
            OdbcError::NoConnectionInfo
            | OdbcError::KeywordNotString { .. }
            | OdbcError::TimeoutNotInteger { .. }
            | OdbcError::TimeoutOutOfRange { .. }
            | OdbcError::TicksNotNumeric { .. }
            | OdbcError::TicksOutOfRange { .. } => ExceptionKind::ProgrammingError,
            OdbcError::Driver { kind, .. } => *kind,
            OdbcError::Environment(_) | OdbcError::Config(_) | OdbcError::Io(_) => {
                ExceptionKind::InterfaceError
            }
            OdbcError::Taxonomy(_) => ExceptionKind::InternalError,
        }
    }

    /// True when this error's kind is `kind` or one of its descendants.
    pub fn is_a(&self, kind: ExceptionKind) -> bool {
        self.kind().is_a(kind)
    }

    /// Environment failures leave the process without a usable driver manager.
    pub fn is_fatal(&self) -> bool {
        matches!(self, OdbcError::Environment(_))
    }
}

/// Type alias for Result to use OdbcError as the error type.
pub type Result<T> = std::result::Result<T, OdbcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            OdbcError::NoConnectionInfo.to_string(),
            "no connection information was supplied"
        );

        let err = OdbcError::KeywordNotString {
            keyword: "server".to_string(),
            found: "int",
        };
        assert!(err.to_string().contains("keyword 'server' must be a string"));

        let config_err = OdbcError::Config("Invalid config".to_string());
        assert!(config_err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_usage_errors_are_programming_errors() {
        let errors = [
            OdbcError::NoConnectionInfo,
            OdbcError::TimeoutNotInteger {
                value: "'abc'".to_string(),
            },
            OdbcError::TicksNotNumeric {
                function: "TimeFromTicks",
            },
        ];
        for err in errors {
            assert_eq!(err.kind(), ExceptionKind::ProgrammingError);
            assert!(err.is_a(ExceptionKind::DatabaseError));
            assert!(err.is_a(ExceptionKind::Error));
            assert!(!err.is_fatal());
        }
    }

    #[test]
    fn test_driver_error_classified_by_sqlstate() {
        let err = OdbcError::driver("23000", "duplicate key");
        assert_eq!(err.kind(), ExceptionKind::IntegrityError);
        assert_eq!(err.to_string(), "[23000] duplicate key");

        let err = OdbcError::driver("IM002", "data source name not found");
        assert_eq!(err.kind(), ExceptionKind::Error);
        assert!(!err.is_a(ExceptionKind::DatabaseError));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OdbcError = io_err.into();
        match err {
            OdbcError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }

        let err: OdbcError = TaxonomyError::Duplicate("Error").into();
        assert_eq!(err.kind(), ExceptionKind::InternalError);
    }
}
