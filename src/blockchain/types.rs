//! Chain-side types and error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors resolving the wallet's secret phrase.
#[derive(Debug, Error)]
pub enum MnemonicError {
    #[error("mnemonic file {} does not exist", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("mnemonic path {} is not a file", .path.display())]
    NotAFile { path: PathBuf },

    #[error("failed to read mnemonic file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Wallet derivation failed. Carries the signer library's message as-is.
#[derive(Debug, Error)]
#[error("Wallet error: {0}")]
pub struct SigningProviderError(pub String);

/// Errors raised by a chain client or while building contract handles.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint could not be turned into a transport.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Transport(String),

    #[error("Invalid ABI for contract {contract}: {reason}")]
    InvalidAbi { contract: String, reason: String },

    #[error("Invalid address '{address}' for contract {contract}: {reason}")]
    InvalidAddress {
        contract: String,
        address: String,
        reason: String,
    },

    #[error("Invalid options for contract {contract}: {reason}")]
    InvalidOptions { contract: String, reason: String },

    /// The client was closed by a disconnect.
    #[error("Client connection is closed")]
    Closed,
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// How the client reaches the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Http,
    WebSocket,
    Ipc,
}

impl TransportKind {
    /// Classify an endpoint string. Anything that is not an http(s) or ws(s)
    /// URL is taken as an IPC socket path.
    pub fn of(endpoint: &str) -> Self {
        match url::Url::parse(endpoint) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Self::Http,
                "ws" | "wss" => Self::WebSocket,
                _ => Self::Ipc,
            },
            Err(_) => Self::Ipc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::WebSocket => "ws",
            Self::Ipc => "ipc",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
