/// # Test Utilities Module
///
/// In-memory stand-ins for the platform driver manager, so environment
/// lifecycle and connect logic can be tested without ODBC installed.
///
/// This module provides:
/// - `MockDriverManager`: records every call and can fail any step on demand
/// - Taxonomy-aware assertion helpers for error results
use crate::connect_spec::ConnectionSpec;
use crate::core::db::driver::{DataSource, DriverFailure, DriverManager, OdbcVersion};
use crate::core::OdbcError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// A driver-manager call observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    EnablePooling,
    Allocate,
    DeclareVersion(OdbcVersion),
    DataSources,
    Drivers,
    Connect(String),
}

/// A driver-manager step that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStep {
    EnablePooling,
    Allocate,
    DeclareVersion,
    DataSources,
    Drivers,
    Connect,
}

impl DriverCall {
    fn step(&self) -> DriverStep {
        match self {
            DriverCall::EnablePooling => DriverStep::EnablePooling,
            DriverCall::Allocate => DriverStep::Allocate,
            DriverCall::DeclareVersion(_) => DriverStep::DeclareVersion,
            DriverCall::DataSources => DriverStep::DataSources,
            DriverCall::Drivers => DriverStep::Drivers,
            DriverCall::Connect(_) => DriverStep::Connect,
        }
    }
}

/// Environment handed out by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockEnvironment {
    /// Sequence number of the allocation that produced this handle
    pub id: usize,
    /// Whether shared pooling had been enabled before allocation
    pub pooled: bool,
    pub version: Option<OdbcVersion>,
}

/// Connection handed out by the mock.
#[derive(Debug)]
pub struct MockConnection<'env> {
    pub environment: &'env MockEnvironment,
    pub spec: ConnectionSpec,
}

/// Recording driver manager with failure injection.
#[derive(Debug)]
pub struct MockDriverManager {
    calls: Mutex<Vec<DriverCall>>,
    failing: Mutex<Option<DriverStep>>,
    pooling_enabled: AtomicBool,
    next_env_id: AtomicUsize,
    allocation_delay: Option<Duration>,
    data_sources: Vec<DataSource>,
    drivers: Vec<String>,
    connect_error: Option<(String, String)>,
}

impl Default for MockDriverManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriverManager {
    pub fn new() -> Self {
        MockDriverManager {
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(None),
            pooling_enabled: AtomicBool::new(false),
            next_env_id: AtomicUsize::new(1),
            allocation_delay: None,
            data_sources: Vec::new(),
            drivers: Vec::new(),
            connect_error: None,
        }
    }

    /// Makes `step` fail until [`clear_failure`](Self::clear_failure) is called.
    pub fn fail_on(self, step: DriverStep) -> Self {
        if let Ok(mut failing) = self.failing.lock() {
            *failing = Some(step);
        }
        self
    }

    pub fn clear_failure(&self) {
        if let Ok(mut failing) = self.failing.lock() {
            *failing = None;
        }
    }

    /// Sleeps inside allocation to widen the window for racing callers.
    pub fn with_allocation_delay(mut self, delay: Duration) -> Self {
        self.allocation_delay = Some(delay);
        self
    }

    pub fn with_data_source(mut self, name: &str, description: &str) -> Self {
        self.data_sources.push(DataSource {
            name: name.to_string(),
            description: description.to_string(),
        });
        self
    }

    pub fn with_driver(mut self, name: &str) -> Self {
        self.drivers.push(name.to_string());
        self
    }

    /// Makes every connect attempt fail with the given diagnostic.
    pub fn with_connect_error(mut self, sqlstate: &str, message: &str) -> Self {
        self.connect_error = Some((sqlstate.to_string(), message.to_string()));
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Number of recorded attempts at `step`, successful or not.
    pub fn count(&self, step: DriverStep) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.step() == step)
            .count()
    }

    fn record(&self, call: DriverCall) -> Result<(), DriverFailure> {
        let step = call.step();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        let failing = self.failing.lock().map(|f| *f).unwrap_or(None);
        if failing == Some(step) {
            return Err(DriverFailure::new(function_name(step), "injected failure")
                .with_sqlstate("HY000"));
        }
        Ok(())
    }
}

fn function_name(step: DriverStep) -> &'static str {
    match step {
        DriverStep::EnablePooling | DriverStep::DeclareVersion => "SQLSetEnvAttr",
        DriverStep::Allocate => "SQLAllocHandle",
        DriverStep::DataSources => "SQLDataSources",
        DriverStep::Drivers => "SQLDrivers",
        DriverStep::Connect => "SQLDriverConnect",
    }
}

impl DriverManager for MockDriverManager {
    type Environment = MockEnvironment;
    type Connection<'env> = MockConnection<'env>;

    fn enable_shared_pooling(&self) -> Result<(), DriverFailure> {
        self.record(DriverCall::EnablePooling)?;
        self.pooling_enabled.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn allocate_environment(&self) -> Result<MockEnvironment, DriverFailure> {
        if let Some(delay) = self.allocation_delay {
            thread::sleep(delay);
        }
        self.record(DriverCall::Allocate)?;
        Ok(MockEnvironment {
            id: self.next_env_id.fetch_add(1, Ordering::SeqCst),
            pooled: self.pooling_enabled.load(Ordering::SeqCst),
            version: None,
        })
    }

    fn declare_version(
        &self,
        env: &mut MockEnvironment,
        version: OdbcVersion,
    ) -> Result<(), DriverFailure> {
        self.record(DriverCall::DeclareVersion(version))?;
        env.version = Some(version);
        Ok(())
    }

    fn data_sources(&self, _env: &MockEnvironment) -> Result<Vec<DataSource>, DriverFailure> {
        self.record(DriverCall::DataSources)?;
        Ok(self.data_sources.clone())
    }

    fn drivers(&self, _env: &MockEnvironment) -> Result<Vec<String>, DriverFailure> {
        self.record(DriverCall::Drivers)?;
        Ok(self.drivers.clone())
    }

    fn connect<'env>(
        &'env self,
        env: &'env MockEnvironment,
        spec: &ConnectionSpec,
    ) -> Result<MockConnection<'env>, OdbcError> {
        self.record(DriverCall::Connect(spec.connection_string()))
            .map_err(|_| OdbcError::driver("08001", "injected failure"))?;
        if let Some((sqlstate, message)) = &self.connect_error {
            return Err(OdbcError::driver(sqlstate.as_str(), message.as_str()));
        }
        Ok(MockConnection {
            environment: env,
            spec: spec.clone(),
        })
    }
}

/// Error testing utilities specific to the exception taxonomy
pub mod error_testing {
    use crate::core::{ExceptionKind, OdbcError};

    /// Asserts that `result` failed with exactly `expected` as its kind.
    pub fn assert_kind<T: std::fmt::Debug>(
        result: &std::result::Result<T, OdbcError>,
        expected: ExceptionKind,
    ) {
        match result {
            Ok(value) => panic!("expected {} but call succeeded with {:?}", expected, value),
            Err(err) => assert_eq!(
                err.kind(),
                expected,
                "expected {} but got {} ({})",
                expected,
                err.kind(),
                err
            ),
        }
    }
}
