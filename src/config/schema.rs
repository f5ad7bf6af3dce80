//! Configuration schema definitions.
//!
//! These types are only ever produced by [`validate_settings`], so holding one
//! means the settings already passed every check.
//!
//! [`validate_settings`]: crate::config::validation::validate_settings

use serde::Serialize;
use serde_json::{Map, Value};

use crate::connector::registry::ContractRegistry;

/// Validated connector settings.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// JSON-RPC endpoint (http, ws or ipc).
    pub provider: String,

    /// Optional signer seed directive.
    pub mnemonic: Option<MnemonicDirective>,

    /// Contracts to expose, keyed by name in input order.
    pub contracts: ContractRegistry,
}

/// Where the wallet's secret phrase comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MnemonicMethod {
    /// `value` is the phrase itself.
    Raw,
    /// `value` is a path to a file holding the phrase.
    File,
}

impl MnemonicMethod {
    /// Parse the settings spelling of a method.
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "raw" => Some(Self::Raw),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::File => "file",
        }
    }
}

impl std::fmt::Display for MnemonicMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mnemonic directive from the settings.
#[derive(Clone, PartialEq, Eq)]
pub struct MnemonicDirective {
    pub method: MnemonicMethod,

    /// Phrase (raw) or path (file). Always non-empty.
    pub value: String,
}

impl std::fmt::Debug for MnemonicDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("MnemonicDirective");
        s.field("method", &self.method);
        match self.method {
            // A raw value is the secret itself.
            MnemonicMethod::Raw => s.field("value", &"<redacted>"),
            MnemonicMethod::File => s.field("value", &self.value),
        };
        s.finish()
    }
}

/// Static description of one deployed contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDescriptor {
    /// Unique key within one connector.
    pub contract_name: String,

    /// JSON ABI entries, opaque until a client builds a handle.
    pub abi: Vec<Value>,

    /// Deployed address as written in the settings.
    pub address: String,

    /// Extra options handed to the client when building the handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}
