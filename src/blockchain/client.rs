//! Blockchain client seams and the alloy-backed implementation.
//!
//! # Responsibilities
//! - Build a client over a signing provider (bare endpoint or wallet)
//! - Build live contract handles from descriptors
//! - Report whether the transport is listening, and close it
//!
//! # Design Decisions
//! - The connector only talks to [`ClientBackend`] and [`ChainClient`], so the
//!   lifecycle and caching logic can run against any client
//! - No timeouts or retries here; callers bound waits themselves
//! - The client owns the only long-lived provider. Contract handles share its
//!   [`ProviderSlot`] and borrow the provider per call, so emptying the slot
//!   on close drops the transport

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use alloy::providers::{DynProvider, Provider, ProviderBuilder};

use crate::blockchain::contract::ContractHandle;
use crate::blockchain::types::{ClientError, ClientResult, TransportKind};
use crate::blockchain::wallet::SigningProvider;
use crate::config::schema::ContractDescriptor;

/// Factory for chain clients.
pub trait ClientBackend: Send + Sync {
    type Client: ChainClient;

    /// Build a client using `provider` as its transport/signing layer.
    fn build_client(&self, provider: &SigningProvider) -> impl Future<Output = ClientResult<Self::Client>> + Send;
}

/// A client bound to one endpoint.
pub trait ChainClient: Send + Sync + 'static {
    /// Live contract handle type.
    type Contract: Send + Sync + 'static;

    /// Build a handle for `descriptor` (abi + address + options).
    fn contract(&self, descriptor: &ContractDescriptor) -> ClientResult<Self::Contract>;

    /// Ask the node whether it is listening.
    fn is_listening(&self) -> impl Future<Output = ClientResult<bool>> + Send;

    /// Close the transport.
    fn close(&self) -> impl Future<Output = ClientResult<()>> + Send;
}

/// Backend that builds [`AlloyClient`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlloyBackend;

impl ClientBackend for AlloyBackend {
    type Client = AlloyClient;

    async fn build_client(&self, provider: &SigningProvider) -> ClientResult<AlloyClient> {
        AlloyClient::connect(provider).await
    }
}

/// Shared home of a client's provider. Empty once the client is closed.
#[derive(Clone)]
pub struct ProviderSlot(Arc<RwLock<Option<DynProvider>>>);

impl ProviderSlot {
    pub fn new(provider: DynProvider) -> Self {
        Self(Arc::new(RwLock::new(Some(provider))))
    }

    /// A short-lived provider clone, or [`ClientError::Closed`].
    pub fn get(&self) -> ClientResult<DynProvider> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ClientError::Closed)
    }

    /// Empty the slot, handing back the provider if it was still there.
    pub fn take(&self) -> Option<DynProvider> {
        self.0.write().unwrap_or_else(PoisonError::into_inner).take()
    }

    pub fn is_closed(&self) -> bool {
        self.0.read().unwrap_or_else(PoisonError::into_inner).is_none()
    }
}

impl std::fmt::Debug for ProviderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSlot").field("closed", &self.is_closed()).finish()
    }
}

/// JSON-RPC client over http, ws or ipc.
pub struct AlloyClient {
    provider: ProviderSlot,
    endpoint: String,
    transport: TransportKind,
}

impl AlloyClient {
    /// Connect to the provider's endpoint, attaching its wallet if any.
    ///
    /// Http clients are created without touching the network; ws and ipc
    /// clients open their connection here.
    pub async fn connect(provider: &SigningProvider) -> ClientResult<Self> {
        let endpoint = provider.endpoint();
        let transport = TransportKind::of(endpoint);

        if transport != TransportKind::Ipc {
            endpoint.parse::<url::Url>().map_err(|e| ClientError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;
        }

        let connect_err = |e: alloy::transports::TransportError| {
            ClientError::Transport(format!("failed to connect to {}: {}", endpoint, e))
        };

        let inner = match provider {
            SigningProvider::Endpoint(_) => ProviderBuilder::new()
                .connect(endpoint)
                .await
                .map_err(connect_err)?
                .erased(),
            SigningProvider::Wallet(wallet) => ProviderBuilder::new()
                .wallet(wallet.wallet().clone())
                .connect(endpoint)
                .await
                .map_err(connect_err)?
                .erased(),
        };

        tracing::info!(
            endpoint = %endpoint,
            transport = %transport,
            signer = ?provider.signer_address(),
            "Blockchain client initialized"
        );

        Ok(Self {
            provider: ProviderSlot::new(inner),
            endpoint: endpoint.to_string(),
            transport,
        })
    }

    /// Get the underlying provider, unless the client was closed.
    pub fn provider(&self) -> ClientResult<DynProvider> {
        self.provider.get()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    pub fn is_closed(&self) -> bool {
        self.provider.is_closed()
    }
}

impl ChainClient for AlloyClient {
    type Contract = ContractHandle;

    fn contract(&self, descriptor: &ContractDescriptor) -> ClientResult<ContractHandle> {
        ContractHandle::new(descriptor, self.provider.clone())
    }

    async fn is_listening(&self) -> ClientResult<bool> {
        let provider = self.provider.get()?;

        provider
            .client()
            .request_noparams::<bool>("net_listening")
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))
    }

    /// Drop the provider.
    ///
    /// Alloy shuts a ws/ipc connection down when its last provider clone is
    /// dropped. Only in-flight calls hold clones past this point.
    async fn close(&self) -> ClientResult<()> {
        let Some(provider) = self.provider.take() else {
            tracing::debug!(endpoint = %self.endpoint, "Client already closed");
            return Ok(());
        };
        drop(provider);

        tracing::info!(endpoint = %self.endpoint, transport = %self.transport, "Client closed");
        Ok(())
    }
}

impl std::fmt::Debug for AlloyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyClient")
            .field("endpoint", &self.endpoint)
            .field("transport", &self.transport)
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::wallet::signing_provider;
    use serde_json::json;

    const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

    #[tokio::test]
    async fn test_http_client_creation() {
        // Http transports are lazy, so this works without a node
        let provider = signing_provider("http://localhost:8545", None).unwrap();
        let client = AlloyBackend.build_client(&provider).await.unwrap();
        assert_eq!(client.transport(), TransportKind::Http);
        assert_eq!(client.endpoint(), "http://localhost:8545");
        assert!(!client.is_closed());
    }

    #[tokio::test]
    async fn test_wallet_client_creation() {
        let provider = signing_provider("http://localhost:8545", Some(TEST_MNEMONIC)).unwrap();
        let client = AlloyBackend.build_client(&provider).await.unwrap();
        assert_eq!(client.transport(), TransportKind::Http);
    }

    #[tokio::test]
    async fn test_invalid_endpoint() {
        let provider = signing_provider("http://", None).unwrap();
        let err = AlloyBackend.build_client(&provider).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    async fn test_contract_handle() {
        let provider = signing_provider("http://localhost:8545", None).unwrap();
        let client = AlloyBackend.build_client(&provider).await.unwrap();
        let descriptor = ContractDescriptor {
            contract_name: "SimpleStorage".to_string(),
            abi: json!([]).as_array().cloned().unwrap(),
            address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            options: None,
        };
        let handle = client.contract(&descriptor).unwrap();
        assert_eq!(handle.name(), "SimpleStorage");
        assert!(handle.instance().is_ok());

        // Handles lose the provider together with the client.
        client.close().await.unwrap();
        assert!(handle.is_closed());
        assert!(matches!(handle.instance(), Err(ClientError::Closed)));
    }

    #[tokio::test]
    async fn test_closed_client_is_not_listening() {
        let provider = signing_provider("http://localhost:8545", None).unwrap();
        let client = AlloyBackend.build_client(&provider).await.unwrap();
        client.close().await.unwrap();
        assert!(client.is_closed());
        assert!(matches!(client.provider(), Err(ClientError::Closed)));
        assert!(matches!(client.is_listening().await, Err(ClientError::Closed)));
        // Closing twice is a no-op
        client.close().await.unwrap();
    }
}
