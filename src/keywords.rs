//! Keyword schema for `connect`.
//!
//! Two small fixed tables: the reserved control keywords that never reach
//! the driver, and the DB-API names that are renamed to their ODBC
//! equivalents before being written into the connection string.

/// DB-API recommended names mapped to ODBC connection-string keywords.
const KEYWORD_MAP: &[(&str, &str)] = &[("user", "uid"), ("password", "pwd"), ("host", "server")];

/// Maps a DB-API keyword to its ODBC name; unknown names pass through unchanged.
///
/// ```
/// use odbckit::keywords::remap;
///
/// assert_eq!(remap("user"), "uid");
/// assert_eq!(remap("Host"), "server");
/// assert_eq!(remap("database"), "database");
/// ```
pub fn remap(name: &str) -> &str {
    KEYWORD_MAP
        .iter()
        .find(|(source, _)| source.eq_ignore_ascii_case(name))
        .map(|(_, target)| *target)
        .unwrap_or(name)
}

/// Control keywords consumed by `connect` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedKeyword {
    AutoCommit,
    Timeout,
    Ansi,
}

impl ReservedKeyword {
    pub const ALL: [ReservedKeyword; 3] = [
        ReservedKeyword::AutoCommit,
        ReservedKeyword::Timeout,
        ReservedKeyword::Ansi,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReservedKeyword::AutoCommit => "autocommit",
            ReservedKeyword::Timeout => "timeout",
            ReservedKeyword::Ansi => "ansi",
        }
    }

    /// Recognises a reserved keyword regardless of case.
    pub fn parse(name: &str) -> Option<ReservedKeyword> {
        Self::ALL
            .into_iter()
            .find(|kw| kw.name().eq_ignore_ascii_case(name))
    }
}
