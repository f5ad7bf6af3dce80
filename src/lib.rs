//! Smart contract connector library.
//!
//! Exposes deployed contracts as named, callable handles over one JSON-RPC
//! endpoint: settings validation, contract registry, lazily built client and
//! handles, and a connect/disconnect lifecycle.

pub mod blockchain;
pub mod config;
pub mod connector;
pub mod observability;

pub use config::schema::ConnectorConfig;
pub use connector::{initialize, Connector, ConnectorError, ConnectorResult};
