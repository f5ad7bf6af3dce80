//! Data access object: the client plus one live handle per contract.

use indexmap::IndexMap;

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::ClientResult;
use crate::connector::registry::ContractRegistry;

/// Client and live contract handles, keyed by contract name.
pub struct DataAccessObject<C: ChainClient> {
    client: C,
    contracts: IndexMap<String, C::Contract>,
}

impl<C: ChainClient> DataAccessObject<C> {
    /// Build one handle per registry entry, in registry order.
    pub fn build(client: C, registry: &ContractRegistry) -> ClientResult<Self> {
        let mut contracts = IndexMap::with_capacity(registry.len());
        for descriptor in registry.iter() {
            let handle = client.contract(descriptor)?;
            tracing::debug!(contract = %descriptor.contract_name, address = %descriptor.address, "Contract handle built");
            contracts.insert(descriptor.contract_name.clone(), handle);
        }

        Ok(Self { client, contracts })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Live handles by name.
    pub fn contracts(&self) -> &IndexMap<String, C::Contract> {
        &self.contracts
    }

    pub fn contract(&self, name: &str) -> Option<&C::Contract> {
        self.contracts.get(name)
    }
}

impl<C: ChainClient + std::fmt::Debug> std::fmt::Debug for DataAccessObject<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataAccessObject")
            .field("client", &self.client)
            .field("contracts", &self.contracts.keys().collect::<Vec<_>>())
            .finish()
    }
}
