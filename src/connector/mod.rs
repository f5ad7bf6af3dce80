//! Connector subsystem.
//!
//! # Data Flow
//! ```text
//! Construction (synchronous, fails fast):
//!     settings → validate + registry → resolve mnemonic → signing provider
//!
//! First data access (async, at most once):
//!     backend.build_client(signing provider)
//!     → one live handle per registry entry
//!     → DataAccessObject cached for the connector's lifetime
//!
//! Lifecycle (async, one wait-then-signal each):
//!     connect    → Connecting → (transport listening) → Connected
//!     disconnect → Disconnecting → (transport closed) → Disconnected
//! ```
//!
//! # Design Decisions
//! - The registry is immutable; a different contract set needs a new connector
//! - The data access object sits in a `tokio::sync::OnceCell`, so concurrent
//!   first calls still build the client once
//! - No reconnect, retry or timeout inside the connector

pub mod dao;
pub mod instance;
pub mod lifecycle;
pub mod registry;
pub mod types;

pub use dao::DataAccessObject;
pub use instance::{initialize, initialize_with, Connector, ContractOf};
pub use lifecycle::ConnectionState;
pub use registry::ContractRegistry;
pub use types::{ConnectorError, ConnectorResult, LifecycleError};
