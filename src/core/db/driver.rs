/// Driver Manager Seam
///
/// Everything this crate needs from the platform ODBC driver manager,
/// expressed as a trait so environment lifecycle and connect logic can be
/// exercised without a live driver manager.
use crate::connect_spec::ConnectionSpec;
use crate::core::error::OdbcError;
use std::fmt;

/// A failed driver-manager call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverFailure {
    /// Name of the driver-manager function that failed
    pub function: &'static str,
    /// SQLSTATE, when the driver manager produced a diagnostic record
    pub sqlstate: Option<String>,
    pub message: String,
}

impl DriverFailure {
    pub fn new(function: &'static str, message: impl Into<String>) -> Self {
        DriverFailure {
            function,
            sqlstate: None,
            message: message.into(),
        }
    }

    pub fn with_sqlstate(mut self, sqlstate: impl Into<String>) -> Self {
        self.sqlstate = Some(sqlstate.into());
        self
    }
}

impl fmt::Display for DriverFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sqlstate {
            Some(state) => write!(f, "{} failed: [{}] {}", self.function, state, self.message),
            None => write!(f, "{} failed: {}", self.function, self.message),
        }
    }
}

impl From<DriverFailure> for OdbcError {
    fn from(failure: DriverFailure) -> Self {
        // No diagnostic record: general error.
        let sqlstate = failure.sqlstate.unwrap_or_else(|| "HY000".to_string());
        OdbcError::driver(sqlstate, format!("{}: {}", failure.function, failure.message))
    }
}

/// ODBC behaviour version declared on the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdbcVersion {
    V3,
    V3_80,
}

/// A named data source as reported by the driver manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub name: String,
    pub description: String,
}

/// Calls the core makes into the driver manager.
///
/// Implementations are shared across threads; the environment they hand
/// back lives for as long as its owning [`EnvironmentManager`].
///
/// [`EnvironmentManager`]: crate::core::db::environment::EnvironmentManager
pub trait DriverManager: Send + Sync {
    /// Process-wide environment handle.
    type Environment: Send + Sync;

    /// Open connection borrowing the environment.
    type Connection<'env>
    where
        Self: 'env;

    /// Switches the driver manager to one shared pool per environment.
    /// Must happen before any environment exists.
    fn enable_shared_pooling(&self) -> Result<(), DriverFailure>;

    fn allocate_environment(&self) -> Result<Self::Environment, DriverFailure>;

    fn declare_version(
        &self,
        env: &mut Self::Environment,
        version: OdbcVersion,
    ) -> Result<(), DriverFailure>;

    fn data_sources(&self, env: &Self::Environment) -> Result<Vec<DataSource>, DriverFailure>;

    fn drivers(&self, env: &Self::Environment) -> Result<Vec<String>, DriverFailure>;

    /// Opens a connection described by `spec`. This is the connection
    /// factory; statement execution lives behind the returned handle.
    fn connect<'env>(
        &'env self,
        env: &'env Self::Environment,
        spec: &ConnectionSpec,
    ) -> Result<Self::Connection<'env>, OdbcError>;
}
