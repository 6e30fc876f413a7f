/// System Driver Manager Backend
///
/// [`DriverManager`] implementation on top of `odbc-api`, plus the
/// process-wide shared client used by the binary.
use crate::client::Client;
use crate::config;
use crate::connect_spec::ConnectionSpec;
use crate::core::db::driver::{DataSource, DriverFailure, DriverManager, OdbcVersion};
use crate::core::{OdbcError, Result};
use odbc_api::sys::AttrConnectionPooling;
use odbc_api::{Connection, ConnectionOptions, Environment};
use once_cell::sync::OnceCell;
use tracing::debug;

/// The platform ODBC driver manager (unixODBC, iODBC or the Windows DM).
#[derive(Debug, Default, Clone, Copy)]
pub struct OdbcDriverManager;

fn sqlstate_of(err: &odbc_api::Error) -> Option<String> {
    match err {
        odbc_api::Error::Diagnostics { record, .. } => Some(record.state.as_str().to_string()),
        _ => None,
    }
}

fn failure(function: &'static str, err: odbc_api::Error) -> DriverFailure {
    let failure = DriverFailure::new(function, err.to_string());
    match sqlstate_of(&err) {
        Some(state) => failure.with_sqlstate(state),
        None => failure,
    }
}

fn classify(err: odbc_api::Error) -> OdbcError {
    let sqlstate = sqlstate_of(&err).unwrap_or_else(|| "HY000".to_string());
    OdbcError::driver(sqlstate, err.to_string())
}

impl DriverManager for OdbcDriverManager {
    type Environment = Environment;
    type Connection<'env> = Connection<'env>;

    fn enable_shared_pooling(&self) -> std::result::Result<(), DriverFailure> {
        // SAFETY: only called from EnvironmentManager's one-time initializer,
        // before any environment has been allocated in this process.
        unsafe { Environment::set_connection_pooling(AttrConnectionPooling::OnePerHenv) }
            .map_err(|e| failure("SQLSetEnvAttr", e))
    }

    fn allocate_environment(&self) -> std::result::Result<Environment, DriverFailure> {
        Environment::new().map_err(|e| failure("SQLAllocHandle", e))
    }

    fn declare_version(
        &self,
        _env: &mut Environment,
        version: OdbcVersion,
    ) -> std::result::Result<(), DriverFailure> {
        // Environment::new sets SQL_ATTR_ODBC_VERSION before returning.
        debug!(?version, "ODBC version declared during allocation");
        Ok(())
    }

    fn data_sources(&self, env: &Environment) -> std::result::Result<Vec<DataSource>, DriverFailure> {
        let sources = env
            .data_sources()
            .map_err(|e| failure("SQLDataSources", e))?;
        Ok(sources
            .into_iter()
            .map(|info| DataSource {
                name: info.server_name,
                description: info.driver,
            })
            .collect())
    }

    fn drivers(&self, env: &Environment) -> std::result::Result<Vec<String>, DriverFailure> {
        let drivers = env.drivers().map_err(|e| failure("SQLDrivers", e))?;
        Ok(drivers.into_iter().map(|info| info.description).collect())
    }

    fn connect<'env>(
        &'env self,
        env: &'env Environment,
        spec: &ConnectionSpec,
    ) -> Result<Connection<'env>> {
        if spec.use_ansi_fallback {
            debug!("ANSI-only connect requested; odbc-api picks the narrow or wide entry point at build time");
        }

        let options = ConnectionOptions {
            login_timeout_sec: spec.login_timeout()?,
            ..ConnectionOptions::default()
        };
        let connection = env
            .connect_with_connection_string(&spec.connection_string(), options)
            .map_err(classify)?;

        // ODBC connections start in autocommit mode; DB-API ones do not.
        connection
            .set_autocommit(spec.autocommit)
            .map_err(classify)?;

        Ok(connection)
    }
}

static SHARED: OnceCell<Client<OdbcDriverManager>> = OnceCell::new();

/// The process-wide client, initialized from the user configuration on first use.
pub fn shared_client() -> Result<&'static Client<OdbcDriverManager>> {
    SHARED.get_or_try_init(|| {
        let config = config::load_default_config()?;
        Client::init(OdbcDriverManager, &config)
    })
}
