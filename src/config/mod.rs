//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! datasource file (JSON/TOML) or host-provided settings
//!     → loader.rs (parse to serde_json::Value)
//!     → validation.rs (schema checks + contract registry)
//!     → ConnectorConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once validated; changes require a new connector
//! - Validation fails fast on the first violation
//! - No defaults: `provider` and `contracts` are required

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_settings, LoadError};
pub use schema::{ConnectorConfig, ContractDescriptor, MnemonicDirective, MnemonicMethod};
pub use validation::{validate_settings, ConfigError, FieldPath, JsonKind};
