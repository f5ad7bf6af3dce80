//! Configuration validation.
//!
//! # Responsibilities
//! - Check raw settings against the connector schema
//! - Register each contract as soon as it passes its own checks
//! - Reject duplicate contract names before they reach the registry
//!
//! # Design Decisions
//! - Returns the first violation, not all of them; the check order is part
//!   of the contract (existence → type → allowed values → uniqueness)
//! - Works on `serde_json::Value` so that type errors can name the field and
//!   contract index instead of surfacing as a serde message
//! - Pure function: no filesystem or network access

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::schema::{ConnectorConfig, ContractDescriptor, MnemonicDirective, MnemonicMethod};
use crate::connector::registry::ContractRegistry;

/// Location of an offending field in the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    /// A top-level (or mnemonic) field, e.g. `provider` or `mnemonic.value`.
    Root(&'static str),
    /// A whole entry of `contracts`.
    Contract(usize),
    /// A field inside one entry of `contracts`.
    ContractField(usize, &'static str),
}

impl FieldPath {
    /// Contract index, for list-typed fields.
    pub fn index(&self) -> Option<usize> {
        match self {
            FieldPath::Root(_) => None,
            FieldPath::Contract(i) | FieldPath::ContractField(i, _) => Some(*i),
        }
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldPath::Root(name) => write!(f, "{}", name),
            FieldPath::Contract(i) => write!(f, "contracts[{}]", i),
            FieldPath::ContractField(i, name) => write!(f, "contracts[{}].{}", i, name),
        }
    }
}

/// JSON kinds the schema asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    String,
    Object,
    Array,
}

impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonKind::String => write!(f, "string"),
            JsonKind::Object => write!(f, "object"),
            JsonKind::Array => write!(f, "array"),
        }
    }
}

/// Schema violations. All of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Field absent or falsy (`null`, `false`, `""`, `0`).
    #[error("{field} must exist")]
    Missing { field: FieldPath },

    #[error("{field} must be of type {expected}")]
    WrongType { field: FieldPath, expected: JsonKind },

    #[error("mnemonic.method must be \"raw\" or \"file\", got {method:?}")]
    InvalidMnemonicMethod { method: String },

    #[error("contracts[{index}] is empty")]
    EmptyContract { index: usize },

    #[error("contractName {name:?} at contracts[{index}] is already defined")]
    DuplicateContract { name: String, index: usize },
}

impl ConfigError {
    /// Index of the offending contract entry, if the error concerns one.
    pub fn index(&self) -> Option<usize> {
        match self {
            ConfigError::Missing { field } | ConfigError::WrongType { field, .. } => field.index(),
            ConfigError::EmptyContract { index } | ConfigError::DuplicateContract { index, .. } => {
                Some(*index)
            }
            ConfigError::InvalidMnemonicMethod { .. } => None,
        }
    }
}

/// Validate raw settings and build the contract registry in the same pass.
pub fn validate_settings(settings: &Value) -> Result<ConnectorConfig, ConfigError> {
    let settings = settings.as_object().ok_or(ConfigError::WrongType {
        field: FieldPath::Root("settings"),
        expected: JsonKind::Object,
    })?;

    let provider = required_string(settings, "provider", FieldPath::Root("provider"))?;
    let mnemonic = validate_mnemonic(settings)?;

    let entries = match present(settings, "contracts") {
        None => {
            return Err(ConfigError::Missing {
                field: FieldPath::Root("contracts"),
            })
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(ConfigError::WrongType {
                field: FieldPath::Root("contracts"),
                expected: JsonKind::Array,
            })
        }
    };

    let mut contracts = ContractRegistry::new();
    for (index, entry) in entries.iter().enumerate() {
        let descriptor = validate_contract(index, entry)?;
        contracts.insert(index, descriptor)?;
    }

    Ok(ConnectorConfig {
        provider,
        mnemonic,
        contracts,
    })
}

fn validate_mnemonic(settings: &Map<String, Value>) -> Result<Option<MnemonicDirective>, ConfigError> {
    let mnemonic = match present(settings, "mnemonic") {
        None => return Ok(None),
        Some(Value::Object(mnemonic)) => mnemonic,
        Some(_) => {
            return Err(ConfigError::WrongType {
                field: FieldPath::Root("mnemonic"),
                expected: JsonKind::Object,
            })
        }
    };

    let method = required_string(mnemonic, "method", FieldPath::Root("mnemonic.method"))?;
    let method = MnemonicMethod::parse(&method).ok_or(ConfigError::InvalidMnemonicMethod { method })?;
    let value = required_string(mnemonic, "value", FieldPath::Root("mnemonic.value"))?;

    Ok(Some(MnemonicDirective { method, value }))
}

fn validate_contract(index: usize, entry: &Value) -> Result<ContractDescriptor, ConfigError> {
    let entry = match entry {
        entry if is_falsy(entry) => return Err(ConfigError::EmptyContract { index }),
        Value::Object(entry) => entry,
        _ => {
            return Err(ConfigError::WrongType {
                field: FieldPath::Contract(index),
                expected: JsonKind::Object,
            })
        }
    };

    let contract_name = required_string(
        entry,
        "contractName",
        FieldPath::ContractField(index, "contractName"),
    )?;

    let abi = match present(entry, "abi") {
        None => {
            return Err(ConfigError::Missing {
                field: FieldPath::ContractField(index, "abi"),
            })
        }
        Some(Value::Array(abi)) => abi.clone(),
        Some(_) => {
            return Err(ConfigError::WrongType {
                field: FieldPath::ContractField(index, "abi"),
                expected: JsonKind::Array,
            })
        }
    };

    let address = required_string(entry, "address", FieldPath::ContractField(index, "address"))?;

    let options = match present(entry, "options") {
        None => None,
        Some(Value::Object(options)) => Some(options.clone()),
        Some(_) => {
            return Err(ConfigError::WrongType {
                field: FieldPath::ContractField(index, "options"),
                expected: JsonKind::Object,
            })
        }
    };

    Ok(ContractDescriptor {
        contract_name,
        abi,
        address,
        options,
    })
}

/// `null`, `false`, `""` and `0` all read as "not given".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Every field of the settings goes through this one presence rule.
fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !is_falsy(value))
}

fn required_string(object: &Map<String, Value>, key: &str, field: FieldPath) -> Result<String, ConfigError> {
    match present(object, key) {
        None => Err(ConfigError::Missing { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ConfigError::WrongType {
            field,
            expected: JsonKind::String,
        }),
    }
}
