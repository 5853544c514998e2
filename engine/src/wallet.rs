//! Wallet connector seam.
//!
//! The app only needs a connected address to prefill the wallet field, so
//! the connector is deliberately small. [`DemoWallet`] is the in-process
//! stand-in used by the binary and the tests: no signing, no chain access.

use std::future::Future;
use std::time::Duration;

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

use nebula_types::{ProviderKind, WALLET_PREFIX};

/// Bytes in an EVM-style address.
const ADDRESS_BYTES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("{} is not available in this demo. Choose MetaMask or Somnia Wallet.", .0.label())]
    Unsupported(ProviderKind),
    #[error("Already connected as {0}. Disconnect first.")]
    AlreadyConnected(String),
}

/// Operations the app expects from a wallet provider.
pub trait WalletConnector {
    fn open_modal(&mut self);
    fn close_modal(&mut self);
    fn is_modal_open(&self) -> bool;

    /// Connect through the given provider. On failure the error is also
    /// kept in [`WalletConnector::error`] for display.
    fn connect(
        &mut self,
        kind: ProviderKind,
    ) -> impl Future<Output = Result<(), WalletError>> + Send;

    fn disconnect(&mut self);
    fn clear_error(&mut self);

    fn is_connected(&self) -> bool {
        self.address().is_some()
    }
    fn address(&self) -> Option<&str>;
    fn error(&self) -> Option<&str>;
}

/// Connector that fabricates deterministic addresses locally.
#[derive(Debug, Default)]
pub struct DemoWallet {
    modal_open: bool,
    address: Option<String>,
    error: Option<String>,
    /// Successful connections so far; mixed into the next address.
    connections: u64,
    handshake: Duration,
}

impl DemoWallet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a provider handshake that takes `handshake` to complete.
    #[must_use]
    pub fn with_handshake(handshake: Duration) -> Self {
        Self {
            handshake,
            ..Self::default()
        }
    }

    fn try_connect(&mut self, kind: ProviderKind) -> Result<(), WalletError> {
        if let Some(address) = &self.address {
            return Err(WalletError::AlreadyConnected(address.clone()));
        }
        if kind == ProviderKind::WalletConnect {
            return Err(WalletError::Unsupported(kind));
        }

        let address = derive_address(kind, self.connections);
        self.connections = self.connections.wrapping_add(1);
        info!(provider = kind.label(), %address, "Wallet connected");
        self.address = Some(address);
        self.error = None;
        self.modal_open = false;
        Ok(())
    }
}

impl WalletConnector for DemoWallet {
    fn open_modal(&mut self) {
        self.modal_open = true;
    }

    fn close_modal(&mut self) {
        self.modal_open = false;
    }

    fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    async fn connect(&mut self, kind: ProviderKind) -> Result<(), WalletError> {
        if !self.handshake.is_zero() {
            tokio::time::sleep(self.handshake).await;
        }
        let outcome = self.try_connect(kind);
        if let Err(err) = &outcome {
            tracing::warn!(provider = kind.label(), %err, "Wallet connect failed");
            self.error = Some(err.to_string());
        }
        outcome
    }

    fn disconnect(&mut self) {
        if let Some(address) = self.address.take() {
            info!(%address, "Wallet disconnected");
        }
    }

    fn clear_error(&mut self) {
        self.error = None;
    }

    fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// `0x` + hex of the first 20 bytes of SHA-256(provider label, counter).
fn derive_address(kind: ProviderKind, counter: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(kind.label().as_bytes());
    hasher.update(counter.to_le_bytes());
    let digest = hasher.finalize();

    let mut address = String::with_capacity(WALLET_PREFIX.len() + ADDRESS_BYTES * 2);
    address.push_str(WALLET_PREFIX);
    for byte in digest.iter().take(ADDRESS_BYTES) {
        address.push_str(&format!("{byte:02x}"));
    }
    address
}
