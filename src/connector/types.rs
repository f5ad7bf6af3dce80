//! Connector error definitions.

use thiserror::Error;

use crate::blockchain::types::{ClientError, MnemonicError, SigningProviderError};
use crate::config::validation::ConfigError;

/// Errors from connect/disconnect.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The data access object (and so the client) does not exist yet.
    #[error("Connector has no client yet; build the data access object first")]
    NotInitialized,

    /// The node answered but reported it is not listening.
    #[error("Transport is not listening")]
    NotListening,

    #[error("Transport error while {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: ClientError,
    },
}

/// Any failure surfaced by the connector.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),

    #[error(transparent)]
    SigningProvider(#[from] SigningProviderError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Result type for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;
