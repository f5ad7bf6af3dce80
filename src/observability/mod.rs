//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, blockchain, connector:
//!     → tracing events (construction, client build, state changes)
//!     → metrics.rs (registry size, client builds, connection state)
//!
//! Consumers:
//!     → logging.rs subscriber (binary only, stderr)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Secrets (mnemonics) never appear in events
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
