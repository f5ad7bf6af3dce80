//! Shared utilities for connector integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Map, Value};

use contract_connector::blockchain::{ChainClient, ClientBackend, ClientError, ClientResult, SigningProvider};
use contract_connector::config::ContractDescriptor;

/// Well-known development mnemonic (Anvil/Hardhat default accounts).
#[allow(dead_code)]
pub const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// First account derived from [`TEST_MNEMONIC`].
#[allow(dead_code)]
pub const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// Backend that records every client build instead of touching a network.
#[derive(Clone, Default)]
pub struct MockBackend {
    pub builds: Arc<AtomicUsize>,
    pub providers: Arc<Mutex<Vec<SigningProvider>>>,
    pub fail_builds: Arc<AtomicBool>,
    pub not_listening: bool,
    pub build_delay: Option<Duration>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// Signing providers clients were built over, in build order.
    #[allow(dead_code)]
    pub fn seen_providers(&self) -> Vec<SigningProvider> {
        self.providers.lock().unwrap().clone()
    }
}

impl ClientBackend for MockBackend {
    type Client = MockClient;

    async fn build_client(&self, provider: &SigningProvider) -> ClientResult<MockClient> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.build_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_builds.load(Ordering::SeqCst) {
            return Err(ClientError::Transport("connection refused".to_string()));
        }

        self.providers.lock().unwrap().push(provider.clone());
        Ok(MockClient {
            endpoint: provider.endpoint().to_string(),
            wallet: provider.is_wallet(),
            listening: !self.not_listening,
            closed: AtomicBool::new(false),
        })
    }
}

#[derive(Debug)]
pub struct MockClient {
    pub endpoint: String,
    pub wallet: bool,
    listening: bool,
    closed: AtomicBool,
}

#[allow(dead_code)]
impl MockClient {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// What a live handle looks like to the tests.
#[derive(Debug, Clone, PartialEq)]
pub struct MockContract {
    pub name: String,
    pub address: String,
    pub abi_len: usize,
    pub options: Option<Map<String, Value>>,
}

impl ChainClient for MockClient {
    type Contract = MockContract;

    fn contract(&self, descriptor: &ContractDescriptor) -> ClientResult<MockContract> {
        Ok(MockContract {
            name: descriptor.contract_name.clone(),
            address: descriptor.address.clone(),
            abi_len: descriptor.abi.len(),
            options: descriptor.options.clone(),
        })
    }

    async fn is_listening(&self) -> ClientResult<bool> {
        if self.is_closed() {
            return Err(ClientError::Closed);
        }
        Ok(self.listening)
    }

    async fn close(&self) -> ClientResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// A contract entry as it appears in a settings file.
#[allow(dead_code)]
pub fn contract(name: &str, address: &str) -> Value {
    json!({ "contractName": name, "abi": [], "address": address })
}

/// Settings with the given contract entries and no mnemonic.
#[allow(dead_code)]
pub fn settings(contracts: Vec<Value>) -> Value {
    json!({ "provider": "http://x", "contracts": contracts })
}
