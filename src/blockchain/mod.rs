//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! MnemonicDirective (raw phrase or file path)
//!     → mnemonic.rs (resolve phrase)
//!     → wallet.rs (SigningProvider: endpoint or wallet-wrapped endpoint)
//!     → client.rs (ClientBackend builds a ChainClient over the provider)
//!     → contract.rs (one ContractHandle per descriptor)
//! ```
//!
//! # Security Constraints
//! - Never log mnemonics or derived keys
//! - Only derived addresses appear in logs

pub mod client;
pub mod contract;
pub mod mnemonic;
pub mod types;
pub mod wallet;

pub use client::{AlloyBackend, AlloyClient, ChainClient, ClientBackend, ProviderSlot};
pub use contract::ContractHandle;
pub use mnemonic::resolve_mnemonic;
pub use types::{ClientError, ClientResult, MnemonicError, SigningProviderError, TransportKind};
pub use wallet::{signing_provider, SigningProvider, WalletProvider};
