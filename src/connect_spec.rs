//! Connection spec construction.
//!
//! Merges an optional ODBC connection string with ordered keyword arguments
//! into a [`ConnectionSpec`]. Reserved control keywords (`autocommit`,
//! `timeout`, `ansi`) are pulled out into typed fields so the string handed
//! to the driver only ever contains driver keywords. Everything else must be
//! text, is renamed through [`keywords::remap`](crate::keywords::remap), and
//! is appended as `key=value`.

use crate::core::{OdbcError, Result, Value};
use crate::keywords::{self, ReservedKeyword};
use std::fmt;
use tracing::debug;

const SEGMENT_SEPARATOR: &str = ";";

/// Driver-ready connection parameters.
#[derive(Clone, PartialEq)]
pub struct ConnectionSpec {
    /// `key=value` segments in insertion order; duplicates are kept
    segments: Vec<String>,
    pub autocommit: bool,
    /// Login timeout in seconds; 0 means the driver default
    pub login_timeout_secs: i64,
    /// Connect with the ANSI entry point only
    pub use_ansi_fallback: bool,
}

impl ConnectionSpec {
    /// Builds a spec from a connection string fragment and keyword arguments.
    ///
    /// The positional string is taken verbatim. Keywords are processed in
    /// the order given, so identical input always yields an identical
    /// connection string.
    ///
    /// # Errors
    ///
    /// All failures are `ProgrammingError`-kind usage errors raised before
    /// any driver call:
    /// - `TimeoutNotInteger` when `timeout` is not integer-like
    /// - `KeywordNotString` when a driver keyword's value is not text
    /// - `NoConnectionInfo` when the resulting connection string is empty
    ///
    /// ```
    /// use odbckit::connect_spec::ConnectionSpec;
    /// use odbckit::core::Value;
    ///
    /// let spec = ConnectionSpec::build(
    ///     Some("DSN=warehouse"),
    ///     &[("user".to_string(), Value::from("alice")), ("timeout".to_string(), Value::from(5))],
    /// )?;
    /// assert_eq!(spec.connection_string(), "DSN=warehouse;uid=alice");
    /// assert_eq!(spec.login_timeout_secs, 5);
    /// # Ok::<(), odbckit::core::OdbcError>(())
    /// ```
    pub fn build(positional: Option<&str>, keywords: &[(String, Value)]) -> Result<ConnectionSpec> {
        let mut spec = ConnectionSpec {
            segments: Vec::new(),
            autocommit: false,
            login_timeout_secs: 0,
            use_ansi_fallback: false,
        };

        if let Some(fragment) = positional.filter(|s| !s.is_empty()) {
            spec.segments.push(fragment.to_string());
        }

        for (name, value) in keywords {
            match ReservedKeyword::parse(name) {
                Some(ReservedKeyword::AutoCommit) => {
                    spec.autocommit = value.is_truthy();
                    debug!(autocommit = spec.autocommit, "Extracted reserved keyword");
                }
                Some(ReservedKeyword::Ansi) => {
                    spec.use_ansi_fallback = value.is_truthy();
                    debug!(ansi = spec.use_ansi_fallback, "Extracted reserved keyword");
                }
                Some(ReservedKeyword::Timeout) => {
                    spec.login_timeout_secs =
                        value.as_integer().ok_or_else(|| OdbcError::TimeoutNotInteger {
                            value: value.to_string(),
                        })?;
                    debug!(timeout = spec.login_timeout_secs, "Extracted reserved keyword");
                }
                None => {
                    let text = value.as_text().ok_or_else(|| OdbcError::KeywordNotString {
                        keyword: name.clone(),
                        found: value.type_name(),
                    })?;
                    let key = keywords::remap(name);
                    debug!(keyword = name.as_str(), mapped = key, "Appending connection keyword");
                    spec.segments.push(format!("{}={}", key, text));
                }
            }
        }

        if spec.segments.is_empty() {
            return Err(OdbcError::NoConnectionInfo);
        }

        Ok(spec)
    }

    /// The `key=value` segments in the order they will be sent.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Serialized connection string handed to the driver.
    pub fn connection_string(&self) -> String {
        self.segments.join(SEGMENT_SEPARATOR)
    }

    /// Login timeout as the driver expects it; `None` leaves the driver default.
    pub fn login_timeout(&self) -> Result<Option<u32>> {
        match self.login_timeout_secs {
            0 => Ok(None),
            secs => u32::try_from(secs)
                .map(Some)
                .map_err(|_| OdbcError::TimeoutOutOfRange { value: secs }),
        }
    }
}

// Connection strings routinely carry passwords.
impl fmt::Debug for ConnectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSpec")
            .field("segments", &self.segments.len())
            .field("autocommit", &self.autocommit)
            .field("login_timeout_secs", &self.login_timeout_secs)
            .field("use_ansi_fallback", &self.use_ansi_fallback)
            .finish()
    }
}

/// Ordered arguments for `connect`.
///
/// ```
/// use odbckit::connect_spec::ConnectArgs;
///
/// let spec = ConnectArgs::new()
///     .keyword("host", "db01")
///     .keyword("autocommit", true)
///     .into_spec()?;
/// assert_eq!(spec.connection_string(), "server=db01");
/// assert!(spec.autocommit);
/// # Ok::<(), odbckit::core::OdbcError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectArgs {
    connection_string: Option<String>,
    keywords: Vec<(String, Value)>,
}

impl ConnectArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing `key=value;key=value` connection string.
    pub fn with_connection_string(connection_string: &str) -> Self {
        ConnectArgs {
            connection_string: Some(connection_string.to_string()),
            keywords: Vec::new(),
        }
    }

    pub fn connection_string(mut self, connection_string: &str) -> Self {
        self.connection_string = Some(connection_string.to_string());
        self
    }

    /// Appends a keyword argument. Order is preserved; repeats are kept.
    pub fn keyword(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.keywords.push((name.to_string(), value.into()));
        self
    }

    pub fn autocommit(self, enabled: bool) -> Self {
        self.keyword(ReservedKeyword::AutoCommit.name(), enabled)
    }

    pub fn ansi(self, enabled: bool) -> Self {
        self.keyword(ReservedKeyword::Ansi.name(), enabled)
    }

    pub fn timeout(self, seconds: i64) -> Self {
        self.keyword(ReservedKeyword::Timeout.name(), seconds)
    }

    pub fn keywords(&self) -> &[(String, Value)] {
        &self.keywords
    }

    pub fn into_spec(self) -> Result<ConnectionSpec> {
        ConnectionSpec::build(self.connection_string.as_deref(), &self.keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExceptionKind;
    use crate::test_utils::error_testing::assert_kind;

    fn kw(name: &str, value: impl Into<Value>) -> (String, Value) {
        (name.to_string(), value.into())
    }

    #[test]
    fn test_positional_only() {
        let spec = ConnectionSpec::build(Some("DSN=test;UID=me"), &[]).unwrap();
        assert_eq!(spec.connection_string(), "DSN=test;UID=me");
        assert!(!spec.autocommit);
        assert_eq!(spec.login_timeout_secs, 0);
        assert!(!spec.use_ansi_fallback);
    }

    #[test]
    fn test_keywords_remapped_and_ordered() {
        let spec = ConnectionSpec::build(
            None,
            &[
                kw("driver", "{SQL Server}"),
                kw("host", "localhost"),
                kw("user", "alice"),
                kw("password", "s3cret"),
            ],
        )
        .unwrap();
        assert_eq!(
            spec.connection_string(),
            "driver={SQL Server};server=localhost;uid=alice;pwd=s3cret"
        );
    }

    #[test]
    fn test_user_becomes_uid() {
        let spec = ConnectionSpec::build(None, &[kw("user", "alice")]).unwrap();
        assert_eq!(spec.segments(), &["uid=alice".to_string()]);
    }

    #[test]
    fn test_positional_then_keywords() {
        let spec =
            ConnectionSpec::build(Some("server=localhost"), &[kw("user", "me")]).unwrap();
        assert_eq!(spec.connection_string(), "server=localhost;uid=me");
    }

    #[test]
    fn test_empty_positional_adds_no_leading_separator() {
        let spec = ConnectionSpec::build(Some(""), &[kw("dsn", "x")]).unwrap();
        assert_eq!(spec.connection_string(), "dsn=x");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let spec = ConnectionSpec::build(Some("uid=a"), &[kw("user", "b"), kw("uid", "c")]).unwrap();
        assert_eq!(spec.connection_string(), "uid=a;uid=b;uid=c");
    }

    #[test]
    fn test_no_connection_info() {
        assert_kind(&ConnectionSpec::build(None, &[]), ExceptionKind::ProgrammingError);
        assert!(matches!(
            ConnectionSpec::build(Some(""), &[]),
            Err(OdbcError::NoConnectionInfo)
        ));
        assert!(matches!(
            ConnectionSpec::build(None, &[kw("autocommit", true), kw("timeout", 3)]),
            Err(OdbcError::NoConnectionInfo)
        ));
    }

    #[test]
    fn test_timeout_extraction() {
        let spec = ConnectionSpec::build(Some("DSN=x"), &[kw("timeout", 5)]).unwrap();
        assert_eq!(spec.login_timeout_secs, 5);
        assert_eq!(spec.login_timeout().unwrap(), Some(5));
        assert_eq!(spec.connection_string(), "DSN=x");
    }

    #[test]
    fn test_timeout_alone_is_not_connection_info() {
        let result = ConnectionSpec::build(None, &[kw("timeout", 5)]);
        assert!(matches!(result, Err(OdbcError::NoConnectionInfo)));

        let spec = ConnectionSpec::build(None, &[kw("timeout", 5), kw("dsn", "x")]).unwrap();
        assert_eq!(spec.login_timeout_secs, 5);
        assert_eq!(spec.segments(), ["dsn=x"]);
    }

    #[test]
    fn test_timeout_must_be_integer() {
        let result = ConnectionSpec::build(None, &[kw("timeout", "abc")]);
        assert!(matches!(result, Err(OdbcError::TimeoutNotInteger { .. })));
        assert_kind(&result, ExceptionKind::ProgrammingError);

        let result = ConnectionSpec::build(Some("DSN=x"), &[kw("timeout", 2.5)]);
        assert!(matches!(result, Err(OdbcError::TimeoutNotInteger { .. })));
    }

    #[test]
    fn test_negative_timeout_rejected_for_driver() {
        let spec = ConnectionSpec::build(Some("DSN=x"), &[kw("timeout", -1)]).unwrap();
        assert!(matches!(
            spec.login_timeout(),
            Err(OdbcError::TimeoutOutOfRange { value: -1 })
        ));
    }

    #[test]
    fn test_autocommit_and_ansi_truthiness() {
        let spec = ConnectionSpec::build(
            Some("DSN=x"),
            &[kw("autocommit", 1), kw("ansi", "yes")],
        )
        .unwrap();
        assert!(spec.autocommit);
        assert!(spec.use_ansi_fallback);
        assert_eq!(spec.connection_string(), "DSN=x");

        let spec = ConnectionSpec::build(Some("DSN=x"), &[kw("AutoCommit", Value::Null)]).unwrap();
        assert!(!spec.autocommit);
    }

    #[test]
    fn test_last_reserved_value_wins() {
        let spec = ConnectionSpec::build(
            Some("DSN=x"),
            &[kw("autocommit", true), kw("autocommit", false)],
        )
        .unwrap();
        assert!(!spec.autocommit);
    }

    #[test]
    fn test_non_string_keyword_rejected() {
        let result = ConnectionSpec::build(Some("DSN=x"), &[kw("port", 1433)]);
        match result {
            Err(OdbcError::KeywordNotString { keyword, found }) => {
                assert_eq!(keyword, "port");
                assert_eq!(found, "int");
            }
            other => panic!("expected KeywordNotString, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_segments() {
        let spec = ConnectionSpec::build(None, &[kw("password", "hunter2")]).unwrap();
        let debug = format!("{:?}", spec);
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_connect_args_builder() {
        let spec = ConnectArgs::with_connection_string("DSN=sales")
            .keyword("user", "bob")
            .autocommit(true)
            .ansi(false)
            .timeout(30)
            .into_spec()
            .unwrap();
        assert_eq!(spec.connection_string(), "DSN=sales;uid=bob");
        assert!(spec.autocommit);
        assert!(!spec.use_ansi_fallback);
        assert_eq!(spec.login_timeout_secs, 30);
    }
}
