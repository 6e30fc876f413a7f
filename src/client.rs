//! The explicit context object.
//!
//! A `Client` bundles everything the module initializes once: the
//! exception taxonomy, locale separators, runtime settings and the
//! environment manager. Connections are opened through it, so the
//! environment is always prepared before the driver sees a request.

use crate::config::Config;
use crate::connect_spec::{ConnectArgs, ConnectionSpec};
use crate::core::db::driver::DriverManager;
use crate::core::db::environment::EnvironmentManager;
use crate::core::{Result, Taxonomy};
use crate::locale::{self, LocaleConv, LocaleSeparators};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

pub struct Client<D: DriverManager> {
    environment: EnvironmentManager<D>,
    taxonomy: Taxonomy,
    separators: LocaleSeparators,
    lowercase: AtomicBool,
}

impl<D: DriverManager> Client<D> {
    /// Initializes the module state.
    ///
    /// Builds the exception taxonomy (all or nothing), resolves locale
    /// separators and records settings. The environment itself is not
    /// allocated until the first `connect`, `data_sources` or `drivers` call.
    pub fn init(driver: D, config: &Config) -> Result<Self> {
        let taxonomy = Taxonomy::standard()?;

        let separators = match &config.locale {
            Some(overrides) => locale::resolve_separators(Some(&LocaleConv::from(overrides))),
            None => locale::load_separators(),
        };

        let environment = EnvironmentManager::new(
            driver,
            config.environment.pooling,
            config.environment.failure_policy(),
        );

        info!(
            pooling = config.environment.pooling,
            policy = ?environment.policy(),
            "odbckit initialized"
        );

        Ok(Client {
            environment,
            taxonomy,
            separators,
            lowercase: AtomicBool::new(config.results.lowercase),
        })
    }

    /// Opens a connection from a connection string and/or keyword arguments.
    pub fn connect(&self, args: ConnectArgs) -> Result<D::Connection<'_>> {
        let spec = args.into_spec()?;
        self.connect_spec(&spec)
    }

    /// Opens a connection from an already-built spec.
    pub fn connect_spec(&self, spec: &ConnectionSpec) -> Result<D::Connection<'_>> {
        let env = self.environment.ensure_ready()?;
        debug!(
            autocommit = spec.autocommit,
            timeout = spec.login_timeout_secs,
            ansi = spec.use_ansi_fallback,
            "Connecting"
        );
        self.environment.driver().connect(env, spec)
    }

    /// Available data source names mapped to their descriptions.
    pub fn data_sources(&self) -> Result<BTreeMap<String, String>> {
        let env = self.environment.ensure_ready()?;
        let sources = self.environment.driver().data_sources(env)?;
        Ok(sources
            .into_iter()
            .map(|ds| (ds.name, ds.description))
            .collect())
    }

    /// Names of the installed drivers.
    pub fn drivers(&self) -> Result<Vec<String>> {
        let env = self.environment.ensure_ready()?;
        Ok(self.environment.driver().drivers(env)?)
    }

    /// Pooling flag for the first connection.
    pub fn pooling(&self) -> bool {
        self.environment.pooling()
    }

    /// Sets the pooling flag. Only effective before the first connection;
    /// returns whether it will take effect.
    pub fn set_pooling(&self, enabled: bool) -> bool {
        self.environment.set_pooling(enabled)
    }

    /// Pooling mode actually in use, once the environment exists.
    pub fn pooling_in_effect(&self) -> Option<bool> {
        self.environment.pooling_in_effect()
    }

    /// Whether result column names are lowercased by the row layer.
    pub fn lowercase(&self) -> bool {
        self.lowercase.load(Ordering::Relaxed)
    }

    pub fn set_lowercase(&self, enabled: bool) {
        self.lowercase.store(enabled, Ordering::Relaxed);
    }

    pub fn separators(&self) -> LocaleSeparators {
        self.separators
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn environment(&self) -> &EnvironmentManager<D> {
        &self.environment
    }
}
