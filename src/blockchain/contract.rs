//! Live contract handles.

use alloy::contract::{ContractInstance, Interface};
use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use alloy::providers::DynProvider;
use serde_json::{Map, Value};

use crate::blockchain::client::ProviderSlot;
use crate::blockchain::types::{ClientError, ClientResult};
use crate::config::schema::ContractDescriptor;

/// A deployed contract bound to the client's provider.
///
/// Call semantics (encoding, sending, decoding) belong to the
/// [`ContractInstance`] built by [`ContractHandle::instance`]; this type only
/// carries what the settings add. It never keeps a provider of its own.
pub struct ContractHandle {
    name: String,
    address: Address,
    interface: Interface,
    provider: ProviderSlot,
    default_from: Option<Address>,
    options: Map<String, Value>,
}

impl ContractHandle {
    /// Bind `descriptor` to the client's provider slot.
    pub fn new(descriptor: &ContractDescriptor, provider: ProviderSlot) -> ClientResult<Self> {
        let name = descriptor.contract_name.clone();

        let abi: JsonAbi = serde_json::from_value(Value::Array(descriptor.abi.clone())).map_err(|e| {
            ClientError::InvalidAbi {
                contract: name.clone(),
                reason: e.to_string(),
            }
        })?;

        let address = descriptor.address.parse::<Address>().map_err(|e| {
            ClientError::InvalidAddress {
                contract: name.clone(),
                address: descriptor.address.clone(),
                reason: e.to_string(),
            }
        })?;

        let options = descriptor.options.clone().unwrap_or_default();
        let default_from = match options.get("from") {
            None | Some(Value::Null) => None,
            Some(Value::String(from)) => Some(from.parse::<Address>().map_err(|e| {
                ClientError::InvalidOptions {
                    contract: name.clone(),
                    reason: format!("from: {}", e),
                }
            })?),
            Some(_) => {
                return Err(ClientError::InvalidOptions {
                    contract: name,
                    reason: "from must be an address string".to_string(),
                })
            }
        };

        Ok(Self {
            name,
            address,
            interface: Interface::new(abi),
            provider,
            default_from,
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &JsonAbi {
        self.interface.abi()
    }

    /// Sender to use for calls when the caller does not pick one.
    pub fn default_from(&self) -> Option<Address> {
        self.default_from
    }

    /// Options exactly as given in the settings.
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// A dynamic contract instance for building calls.
    ///
    /// Fails with [`ClientError::Closed`] after the client was closed. Drop
    /// the instance when the call is done.
    pub fn instance(&self) -> ClientResult<ContractInstance<DynProvider>> {
        let provider = self.provider.get()?;
        Ok(ContractInstance::new(self.address, provider, self.interface.clone()))
    }

    pub fn is_closed(&self) -> bool {
        self.provider.is_closed()
    }
}

impl std::fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractHandle")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("default_from", &self.default_from)
            .finish()
    }
}
