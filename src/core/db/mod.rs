/// Driver Manager Layer
///
/// ## Architecture
///
/// - **Driver seam** (`driver.rs`): the calls the core makes into the platform driver manager
/// - **Environment management** (`environment.rs`): one-time, race-free allocation of the
///   process environment and the pooling freeze
/// - **System backend** (`odbc.rs`, feature `odbc`): the seam implemented with `odbc-api`
///
/// ## Error Handling
///
/// Environment failures surface as `EnvironmentError` (or abort the process under
/// `FailurePolicy::Abort`); every other driver failure is classified into the
/// exception taxonomy by SQLSTATE.
pub mod driver;
pub mod environment;
#[cfg(feature = "odbc")]
pub mod odbc;

pub use driver::*;
pub use environment::*;
