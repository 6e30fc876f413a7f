/// Environment Management Module
///
/// Owns the single driver-manager environment handle. The handle is
/// allocated lazily on first use, exactly once, behind a `OnceCell` so two
/// threads racing on the first connection cannot both allocate. The pooling
/// flag is read only during that allocation; changing it afterwards has no
/// effect for the lifetime of the manager.
use crate::core::db::driver::{DriverFailure, DriverManager, OdbcVersion};
use once_cell::sync::OnceCell;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// What to do when the environment cannot be prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log and abort the process. Nothing can run without an environment.
    Abort,
    /// Return the failure to the caller and stay unallocated.
    #[default]
    ReturnError,
}

/// The environment could not be prepared. Unrecoverable for the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvironmentError {
    #[error("unable to enable connection pooling: {0}")]
    Pooling(DriverFailure),

    #[error("unable to allocate the ODBC environment: {0}")]
    Allocate(DriverFailure),

    #[error("unable to set the ODBC version attribute: {0}")]
    Version(DriverFailure),
}

#[derive(Debug)]
struct Allocated<E> {
    env: E,
    pooling: bool,
}

/// Requested pooling mode and, once allocation has read it, the frozen one.
#[derive(Debug)]
struct PoolingState {
    requested: bool,
    frozen: Option<bool>,
}

/// Guarded one-time owner of the environment handle.
pub struct EnvironmentManager<D: DriverManager> {
    driver: D,
    pooling: Mutex<PoolingState>,
    policy: FailurePolicy,
    state: OnceCell<Allocated<D::Environment>>,
}

impl<D: DriverManager> EnvironmentManager<D> {
    pub fn new(driver: D, pooling: bool, policy: FailurePolicy) -> Self {
        EnvironmentManager {
            driver,
            pooling: Mutex::new(PoolingState {
                requested: pooling,
                frozen: None,
            }),
            policy,
            state: OnceCell::new(),
        }
    }

    /// Returns the environment, allocating it on the first call.
    ///
    /// Later calls are a single state check. Concurrent first calls block
    /// until one of them finishes allocating.
    pub fn ensure_ready(&self) -> Result<&D::Environment, EnvironmentError> {
        self.state
            .get_or_try_init(|| self.allocate())
            .map(|state| &state.env)
            .map_err(|err| self.on_failure(err))
    }

    fn pooling_state(&self) -> MutexGuard<'_, PoolingState> {
        self.pooling.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs the allocation sequence with the pooling state locked, so a
    /// concurrent `set_pooling` sees either the old request or the frozen mode.
    fn allocate(&self) -> Result<Allocated<D::Environment>, EnvironmentError> {
        let mut pooling_state = self.pooling_state();
        let pooling = pooling_state.requested;

        if pooling {
            debug!("Enabling one-per-environment connection pooling");
            self.driver
                .enable_shared_pooling()
                .map_err(EnvironmentError::Pooling)?;
        }

        let mut env = self
            .driver
            .allocate_environment()
            .map_err(EnvironmentError::Allocate)?;

        self.driver
            .declare_version(&mut env, OdbcVersion::V3)
            .map_err(EnvironmentError::Version)?;

        pooling_state.frozen = Some(pooling);
        info!(pooling, "ODBC environment allocated");
        Ok(Allocated { env, pooling })
    }

    fn on_failure(&self, err: EnvironmentError) -> EnvironmentError {
        match self.policy {
            FailurePolicy::Abort => {
                error!("Cannot initialize the ODBC environment: {}", err);
                std::process::abort();
            }
            FailurePolicy::ReturnError => {
                error!("ODBC environment initialization failed: {}", err);
                err
            }
        }
    }

    /// Sets the pooling flag used by the first allocation.
    ///
    /// Returns `false` (and changes nothing observable) once the
    /// environment exists. A call made while allocation is running waits
    /// for it to finish and then returns `false`.
    pub fn set_pooling(&self, enabled: bool) -> bool {
        let mut pooling_state = self.pooling_state();
        pooling_state.requested = enabled;
        if let Some(in_effect) = pooling_state.frozen {
            if in_effect != enabled {
                warn!(
                    requested = enabled,
                    in_effect,
                    "Pooling can only be changed before the first connection; ignoring"
                );
            }
            return false;
        }
        true
    }

    /// The configured pooling flag (what the next allocation would use).
    pub fn pooling(&self) -> bool {
        self.pooling_state().requested
    }

    /// The pooling mode frozen at allocation, if allocated.
    pub fn pooling_in_effect(&self) -> Option<bool> {
        self.state.get().map(|s| s.pooling)
    }

    pub fn is_allocated(&self) -> bool {
        self.state.get().is_some()
    }

    pub fn environment(&self) -> Option<&D::Environment> {
        self.state.get().map(|s| &s.env)
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}
