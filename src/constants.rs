//! Module-level constants.
//!
//! DB-API module attributes plus the named ODBC integer codes exported for
//! callers of `getinfo`, column metadata and parameter descriptions.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// DB-API level supported.
pub const APILEVEL: &str = "2.0";

/// Threads may share the module but not connections.
pub const THREADSAFETY: u8 = 1;

/// Parameters are marked with question marks.
pub const PARAMSTYLE: &str = "qmark";

/// DB-API type objects, as the Rust types values of that kind are read into.
pub type Date = chrono::NaiveDate;
pub type Time = chrono::NaiveTime;
pub type Timestamp = chrono::NaiveDateTime;
pub type Binary = Vec<u8>;

#[allow(non_camel_case_types)]
pub type DATETIME = Timestamp;
#[allow(non_camel_case_types)]
pub type STRING = String;
#[allow(non_camel_case_types)]
pub type NUMBER = f64;
#[allow(non_camel_case_types)]
pub type ROWID = i64;
#[allow(non_camel_case_types)]
pub type BINARY = Binary;

/// Named ODBC constants, in export order.
pub const SQL_CONSTANTS: &[(&str, i32)] = &[
    // SQL data types
    ("SQL_UNKNOWN_TYPE", 0),
    ("SQL_CHAR", 1),
    ("SQL_VARCHAR", 12),
    ("SQL_LONGVARCHAR", -1),
    ("SQL_WCHAR", -8),
    ("SQL_WVARCHAR", -9),
    ("SQL_WLONGVARCHAR", -10),
    ("SQL_DECIMAL", 3),
    ("SQL_NUMERIC", 2),
    ("SQL_SMALLINT", 5),
    ("SQL_INTEGER", 4),
    ("SQL_REAL", 7),
    ("SQL_FLOAT", 6),
    ("SQL_DOUBLE", 8),
    ("SQL_BIT", -7),
    ("SQL_TINYINT", -6),
    ("SQL_BIGINT", -5),
    ("SQL_BINARY", -2),
    ("SQL_VARBINARY", -3),
    ("SQL_LONGVARBINARY", -4),
    ("SQL_TYPE_DATE", 91),
    ("SQL_TYPE_TIME", 92),
    ("SQL_TYPE_TIMESTAMP", 93),
    ("SQL_SS_TIME2", -154),
    ("SQL_SS_XML", -152),
    ("SQL_INTERVAL_MONTH", 102),
    ("SQL_INTERVAL_YEAR", 101),
    ("SQL_INTERVAL_YEAR_TO_MONTH", 107),
    ("SQL_INTERVAL_DAY", 103),
    ("SQL_INTERVAL_HOUR", 104),
    ("SQL_INTERVAL_MINUTE", 105),
    ("SQL_INTERVAL_SECOND", 106),
    ("SQL_INTERVAL_DAY_TO_HOUR", 108),
    ("SQL_INTERVAL_DAY_TO_MINUTE", 109),
    ("SQL_INTERVAL_DAY_TO_SECOND", 110),
    ("SQL_INTERVAL_HOUR_TO_MINUTE", 111),
    ("SQL_INTERVAL_HOUR_TO_SECOND", 112),
    ("SQL_INTERVAL_MINUTE_TO_SECOND", 113),
    ("SQL_GUID", -11),
    // Nullability
    ("SQL_NULLABLE", 1),
    ("SQL_NO_NULLS", 0),
    ("SQL_NULLABLE_UNKNOWN", 2),
    // SQLStatistics index types
    ("SQL_INDEX_CLUSTERED", 1),
    ("SQL_INDEX_HASHED", 2),
    ("SQL_INDEX_OTHER", 3),
    // SQLSpecialColumns
    ("SQL_SCOPE_CURROW", 0),
    ("SQL_SCOPE_TRANSACTION", 1),
    ("SQL_SCOPE_SESSION", 2),
    ("SQL_PC_UNKNOWN", 0),
    ("SQL_PC_NOT_PSEUDO", 1),
    ("SQL_PC_PSEUDO", 2),
    // SQLProcedureColumns
    ("SQL_PARAM_TYPE_UNKNOWN", 0),
    ("SQL_PARAM_INPUT", 1),
    ("SQL_PARAM_INPUT_OUTPUT", 2),
    ("SQL_RESULT_COL", 3),
    ("SQL_PARAM_OUTPUT", 4),
    ("SQL_RETURN_VALUE", 5),
    // SQLGetInfo
    ("SQL_MAX_DRIVER_CONNECTIONS", 0),
    ("SQL_MAX_CONCURRENT_ACTIVITIES", 1),
    ("SQL_DATA_SOURCE_NAME", 2),
    ("SQL_DRIVER_HENV", 4),
    ("SQL_DRIVER_HSTMT", 5),
    ("SQL_DRIVER_NAME", 6),
    ("SQL_DRIVER_VER", 7),
    ("SQL_ODBC_VER", 10),
    ("SQL_ROW_UPDATES", 11),
    ("SQL_SERVER_NAME", 13),
    ("SQL_SEARCH_PATTERN_ESCAPE", 14),
    ("SQL_DATABASE_NAME", 16),
    ("SQL_DBMS_NAME", 17),
    ("SQL_DBMS_VER", 18),
    ("SQL_ACCESSIBLE_TABLES", 19),
    ("SQL_ACCESSIBLE_PROCEDURES", 20),
    ("SQL_PROCEDURES", 21),
    ("SQL_CONCAT_NULL_BEHAVIOR", 22),
    ("SQL_CURSOR_COMMIT_BEHAVIOR", 23),
    ("SQL_CURSOR_ROLLBACK_BEHAVIOR", 24),
    ("SQL_DATA_SOURCE_READ_ONLY", 25),
    ("SQL_DEFAULT_TXN_ISOLATION", 26),
    ("SQL_EXPRESSIONS_IN_ORDERBY", 27),
    ("SQL_IDENTIFIER_CASE", 28),
    ("SQL_IDENTIFIER_QUOTE_CHAR", 29),
    ("SQL_MAX_COLUMN_NAME_LEN", 30),
    ("SQL_MAX_CURSOR_NAME_LEN", 31),
    ("SQL_MAX_SCHEMA_NAME_LEN", 32),
    ("SQL_MAX_PROCEDURE_NAME_LEN", 33),
    ("SQL_MAX_CATALOG_NAME_LEN", 34),
    ("SQL_MAX_TABLE_NAME_LEN", 35),
    ("SQL_MULT_RESULT_SETS", 36),
    ("SQL_MULTIPLE_ACTIVE_TXN", 37),
    ("SQL_SCHEMA_TERM", 39),
    ("SQL_PROCEDURE_TERM", 40),
    ("SQL_CATALOG_NAME_SEPARATOR", 41),
    ("SQL_CATALOG_TERM", 42),
    ("SQL_SCROLL_OPTIONS", 44),
    ("SQL_TABLE_TERM", 45),
    ("SQL_TXN_CAPABLE", 46),
    ("SQL_USER_NAME", 47),
    ("SQL_DRIVER_ODBC_VER", 77),
    ("SQL_COLUMN_ALIAS", 87),
    ("SQL_GROUP_BY", 88),
    ("SQL_KEYWORDS", 89),
    ("SQL_ORDER_BY_COLUMNS_IN_SELECT", 90),
    ("SQL_SPECIAL_CHARACTERS", 94),
    ("SQL_SUBQUERIES", 95),
    ("SQL_UNION", 96),
    ("SQL_MAX_COLUMNS_IN_GROUP_BY", 97),
    ("SQL_MAX_COLUMNS_IN_INDEX", 98),
    ("SQL_MAX_COLUMNS_IN_ORDER_BY", 99),
    ("SQL_MAX_COLUMNS_IN_SELECT", 100),
    ("SQL_MAX_COLUMNS_IN_TABLE", 101),
    ("SQL_MAX_INDEX_SIZE", 102),
    ("SQL_MAX_ROW_SIZE_INCLUDES_LONG", 103),
    ("SQL_MAX_ROW_SIZE", 104),
    ("SQL_MAX_STATEMENT_LEN", 105),
    ("SQL_MAX_TABLES_IN_SELECT", 106),
    ("SQL_MAX_USER_NAME_LEN", 107),
    ("SQL_MAX_CHAR_LITERAL_LEN", 108),
    ("SQL_NEED_LONG_DATA_LEN", 111),
    ("SQL_MAX_BINARY_LITERAL_LEN", 112),
    ("SQL_LIKE_ESCAPE_CLAUSE", 113),
    ("SQL_DM_VER", 171),
    ("SQL_MAX_IDENTIFIER_LEN", 10005),
    ("SQL_XOPEN_CLI_YEAR", 10000),
];

/// Looks up an exported constant by name.
pub fn constant(name: &str) -> Option<i32> {
    SQL_CONSTANTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| *v)
}
