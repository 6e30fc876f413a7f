//! Initialization and argument-normalization layer for an ODBC client.
//!
//! - [`connect_spec`] turns a connection string plus keyword arguments into a
//!   driver-ready [`ConnectionSpec`](connect_spec::ConnectionSpec)
//! - [`core::db::environment`] owns the single driver-manager environment
//! - [`core::taxonomy`] is the DB-API exception hierarchy every error maps onto
//! - [`client::Client`] ties them together behind `connect`

// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod client;
pub mod config;
pub mod connect_spec;
pub mod constants;
pub mod keywords;
pub mod locale;
pub mod test_utils;
pub mod ticks;

pub use client::Client;
pub use connect_spec::{ConnectArgs, ConnectionSpec};
pub use crate::core::{ExceptionKind, OdbcError, Result, Value};
