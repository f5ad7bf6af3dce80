//! Signing provider construction.
//!
//! # Security
//! - Phrases are consumed here and never logged or stored
//! - Only the derived address is exposed for diagnostics

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};

use crate::blockchain::types::SigningProviderError;

/// Transport/signing layer handed to the chain client.
#[derive(Debug, Clone)]
pub enum SigningProvider {
    /// Bare endpoint; the node manages accounts.
    Endpoint(String),
    /// Endpoint wrapped with a local wallet.
    Wallet(WalletProvider),
}

impl SigningProvider {
    /// The endpoint the client connects to.
    pub fn endpoint(&self) -> &str {
        match self {
            SigningProvider::Endpoint(endpoint) => endpoint,
            SigningProvider::Wallet(wallet) => wallet.endpoint(),
        }
    }

    pub fn is_wallet(&self) -> bool {
        matches!(self, SigningProvider::Wallet(_))
    }

    /// Address transactions are signed with, when a wallet is configured.
    pub fn signer_address(&self) -> Option<Address> {
        match self {
            SigningProvider::Endpoint(_) => None,
            SigningProvider::Wallet(wallet) => Some(wallet.address()),
        }
    }
}

/// An endpoint paired with a wallet derived from a mnemonic.
#[derive(Clone)]
pub struct WalletProvider {
    endpoint: String,
    wallet: EthereumWallet,
    address: Address,
}

impl WalletProvider {
    /// Derive the first account (`m/44'/60'/0'/0/0`) from `phrase`.
    pub fn from_phrase(endpoint: &str, phrase: &str) -> Result<Self, SigningProviderError> {
        let signer: PrivateKeySigner = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .index(0u32)
            .map_err(|e| SigningProviderError(e.to_string()))?
            .build()
            .map_err(|e| SigningProviderError(e.to_string()))?;

        let address = signer.address();
        tracing::info!(address = %address, "Wallet initialized");

        Ok(Self {
            endpoint: endpoint.to_string(),
            wallet: EthereumWallet::from(signer),
            address,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn wallet(&self) -> &EthereumWallet {
        &self.wallet
    }

    /// Default signer address.
    pub fn address(&self) -> Address {
        self.address
    }
}

impl std::fmt::Debug for WalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletProvider")
            .field("endpoint", &self.endpoint)
            .field("address", &self.address)
            .finish()
    }
}

/// Build the signing provider for `endpoint`.
///
/// Without a phrase the endpoint itself is the provider; with one, the
/// endpoint is wrapped in a wallet seeded by it.
pub fn signing_provider(endpoint: &str, phrase: Option<&str>) -> Result<SigningProvider, SigningProviderError> {
    match phrase {
        None => Ok(SigningProvider::Endpoint(endpoint.to_string())),
        Some(phrase) => Ok(SigningProvider::Wallet(WalletProvider::from_phrase(endpoint, phrase)?)),
    }
}
