//! The connector instance handed to the host framework.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::blockchain::client::{AlloyBackend, ChainClient, ClientBackend};
use crate::blockchain::mnemonic::resolve_mnemonic;
use crate::blockchain::wallet::{signing_provider, SigningProvider};
use crate::config::schema::ConnectorConfig;
use crate::config::validation::validate_settings;
use crate::connector::dao::DataAccessObject;
use crate::connector::lifecycle::{ConnectionState, Lifecycle};
use crate::connector::registry::ContractRegistry;
use crate::connector::types::{ConnectorResult, LifecycleError};
use crate::observability::metrics;

/// Live handle type produced by a backend's client.
pub type ContractOf<B> = <<B as ClientBackend>::Client as ChainClient>::Contract;

/// Exposes a set of deployed contracts through one endpoint.
///
/// Construction validates the settings and builds the signing provider but
/// opens nothing; the client and contract handles are built on the first
/// [`data_access_object`](Self::data_access_object) call and then reused.
pub struct Connector<B: ClientBackend = AlloyBackend> {
    backend: B,
    signing_provider: SigningProvider,
    contracts_options: ContractRegistry,
    dao: OnceCell<Arc<DataAccessObject<B::Client>>>,
    lifecycle: Lifecycle,
}

impl Connector<AlloyBackend> {
    /// Build a connector over alloy from raw settings.
    pub fn new(settings: &Value) -> ConnectorResult<Self> {
        Self::with_backend(settings, AlloyBackend)
    }
}

impl<B: ClientBackend> Connector<B> {
    /// Build a connector from raw settings using `backend` for clients.
    pub fn with_backend(settings: &Value, backend: B) -> ConnectorResult<Self> {
        let config = validate_settings(settings)?;
        Self::from_config(config, backend)
    }

    /// Build a connector from already validated settings.
    pub fn from_config(config: ConnectorConfig, backend: B) -> ConnectorResult<Self> {
        let phrase = config.mnemonic.as_ref().map(resolve_mnemonic).transpose()?;
        let signing_provider = signing_provider(&config.provider, phrase.as_deref())?;

        metrics::record_registry_size(config.contracts.len());
        tracing::info!(
            endpoint = %config.provider,
            contracts = config.contracts.len(),
            wallet = signing_provider.is_wallet(),
            "Connector created"
        );

        Ok(Self {
            backend,
            signing_provider,
            contracts_options: config.contracts,
            dao: OnceCell::new(),
            lifecycle: Lifecycle::new(),
        })
    }

    /// Get the data access object, building it on first use.
    ///
    /// Concurrent first callers share one build. A failed build is not
    /// cached, so the next call tries again.
    pub async fn data_access_object(&self) -> ConnectorResult<Arc<DataAccessObject<B::Client>>> {
        let dao = self
            .dao
            .get_or_try_init(|| async {
                let client = self.backend.build_client(&self.signing_provider).await?;
                metrics::record_client_built();

                let dao = DataAccessObject::build(client, &self.contracts_options)?;
                tracing::info!(contracts = dao.contracts().len(), "Data access object built");
                Ok::<_, crate::blockchain::types::ClientError>(Arc::new(dao))
            })
            .await?;

        Ok(Arc::clone(dao))
    }

    /// Live handles, once the data access object exists.
    pub fn contracts(&self) -> Option<&IndexMap<String, ContractOf<B>>> {
        self.dao.get().map(|dao| dao.contracts())
    }

    /// Live handle for `name`, once the data access object exists.
    pub fn contract(&self, name: &str) -> Option<&ContractOf<B>> {
        self.dao.get().and_then(|dao| dao.contract(name))
    }

    /// Validated descriptors keyed by contract name.
    pub fn contracts_options(&self) -> &ContractRegistry {
        &self.contracts_options
    }

    pub fn signing_provider(&self) -> &SigningProvider {
        &self.signing_provider
    }

    pub fn state(&self) -> ConnectionState {
        self.lifecycle.state()
    }

    /// Resolve once the transport reports it is listening.
    ///
    /// The data access object must have been built first.
    pub async fn connect(&self) -> ConnectorResult<()> {
        let dao = self.dao.get().ok_or(LifecycleError::NotInitialized)?;
        self.lifecycle.connect(dao.client()).await?;
        Ok(())
    }

    /// Resolve once the transport is closed.
    pub async fn disconnect(&self) -> ConnectorResult<()> {
        let dao = self.dao.get().ok_or(LifecycleError::NotInitialized)?;
        self.lifecycle.disconnect(dao.client()).await?;
        Ok(())
    }

    /// Same as [`disconnect`](Self::disconnect).
    pub async fn close(&self) -> ConnectorResult<()> {
        self.disconnect().await
    }
}

impl<B: ClientBackend> std::fmt::Debug for Connector<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("signing_provider", &self.signing_provider)
            .field("contracts", &self.contracts_options.names().collect::<Vec<_>>())
            .field("initialized", &self.dao.initialized())
            .field("state", &self.state())
            .finish()
    }
}

/// Build an alloy connector and its data access object in one step.
pub async fn initialize(settings: &Value) -> ConnectorResult<Connector> {
    initialize_with(settings, AlloyBackend).await
}

/// Build a connector with `backend` and its data access object in one step,
/// so it is ready for [`Connector::connect`].
pub async fn initialize_with<B: ClientBackend>(settings: &Value, backend: B) -> ConnectorResult<Connector<B>> {
    let connector = Connector::with_backend(settings, backend)?;
    connector.data_access_object().await?;
    Ok(connector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::MnemonicError;
    use crate::connector::types::ConnectorError;
    use serde_json::json;

    const ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn settings() -> Value {
        json!({
            "provider": "http://localhost:8545",
            "contracts": [{ "contractName": "SimpleStorage", "abi": [], "address": ADDRESS }]
        })
    }

    #[test]
    fn test_construction_opens_nothing() {
        let connector = Connector::new(&settings()).unwrap();
        assert!(connector.contracts().is_none());
        assert_eq!(connector.state(), ConnectionState::Uninitialized);
        assert!(!connector.signing_provider().is_wallet());
        assert!(connector.contracts_options().contains("SimpleStorage"));
    }

    #[test]
    fn test_missing_mnemonic_file_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings();
        settings["mnemonic"] = json!({ "method": "file", "value": dir.path().join("nope").to_str().unwrap() });

        let err = Connector::new(&settings).unwrap_err();
        assert!(matches!(err, ConnectorError::Mnemonic(MnemonicError::FileNotFound { .. })));
    }

    #[test]
    fn test_bad_phrase_fails_construction() {
        let mut settings = settings();
        settings["mnemonic"] = json!({ "method": "raw", "value": "not twelve words" });
        assert!(matches!(
            Connector::new(&settings).unwrap_err(),
            ConnectorError::SigningProvider(_)
        ));
    }

    #[tokio::test]
    async fn test_connect_before_access_is_rejected() {
        let connector = Connector::new(&settings()).unwrap();
        let err = connector.connect().await.unwrap_err();
        assert!(matches!(err, ConnectorError::Lifecycle(LifecycleError::NotInitialized)));
        assert_eq!(connector.state(), ConnectionState::Uninitialized);
    }

    #[tokio::test]
    async fn test_initialize_builds_alloy_handles() {
        let connector = initialize(&settings()).await.unwrap();
        let handle = connector.contract("SimpleStorage").unwrap();
        assert_eq!(handle.address(), ADDRESS.parse::<alloy::primitives::Address>().unwrap());

        let dao = connector.data_access_object().await.unwrap();
        assert_eq!(dao.client().endpoint(), "http://localhost:8545");
    }

    #[tokio::test]
    async fn test_disconnect_closes_alloy_client() {
        let connector = initialize(&settings()).await.unwrap();
        connector.close().await.unwrap();
        assert_eq!(connector.state(), ConnectionState::Disconnected);
        assert!(connector.data_access_object().await.unwrap().client().is_closed());
    }
}
