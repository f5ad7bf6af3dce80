//! Connection lifecycle.
//!
//! ```text
//! Uninitialized → Connecting → Connected → Disconnecting → Disconnected
//! ```
//!
//! Each operation is a single wait-then-signal: move to the in-progress
//! state, await the transport, move to the final state. Failures leave the
//! in-progress state in place; there is no rollback, retry or reconnect.

use std::sync::{Mutex, PoisonError};

use crate::blockchain::client::ChainClient;
use crate::connector::types::LifecycleError;
use crate::observability::metrics;

/// Where the connector's transport is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Uninitialized,
    Connecting,
    Connected,
    Disconnecting,
    Disconnected,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnecting => "disconnecting",
            Self::Disconnected => "disconnected",
        }
    }

    /// Numeric code for the state gauge.
    pub fn code(&self) -> u8 {
        match self {
            Self::Uninitialized => 0,
            Self::Connecting => 1,
            Self::Connected => 2,
            Self::Disconnecting => 3,
            Self::Disconnected => 4,
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records lifecycle transitions.
///
/// The mutex only guards the recorded state; concurrent connect/disconnect
/// calls are not serialized against each other.
#[derive(Debug)]
pub struct Lifecycle {
    state: Mutex<ConnectionState>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ConnectionState::Uninitialized),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, to: ConnectionState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let from = *state;
        *state = to;
        drop(state);

        tracing::debug!(from = %from, to = %to, "Connector state changed");
        metrics::record_connection_state(to);
    }

    /// Wait for `client` to report it is listening.
    pub async fn connect<C: ChainClient>(&self, client: &C) -> Result<(), LifecycleError> {
        self.transition(ConnectionState::Connecting);

        match client.is_listening().await {
            Ok(true) => {
                self.transition(ConnectionState::Connected);
                tracing::info!("Connector connected");
                Ok(())
            }
            Ok(false) => {
                tracing::error!("Transport reported not listening");
                Err(LifecycleError::NotListening)
            }
            Err(source) => {
                tracing::error!(error = %source, "Connect failed");
                Err(LifecycleError::Transport {
                    operation: "connecting",
                    source,
                })
            }
        }
    }

    /// Wait for `client` to close its transport.
    pub async fn disconnect<C: ChainClient>(&self, client: &C) -> Result<(), LifecycleError> {
        self.transition(ConnectionState::Disconnecting);

        match client.close().await {
            Ok(()) => {
                self.transition(ConnectionState::Disconnected);
                tracing::info!("Connector disconnected");
                Ok(())
            }
            Err(source) => {
                tracing::error!(error = %source, "Disconnect failed");
                Err(LifecycleError::Transport {
                    operation: "disconnecting",
                    source,
                })
            }
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
