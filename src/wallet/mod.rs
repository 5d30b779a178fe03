// SPDX-License-Identifier: MPL-2.0
//! Wallet connector wiring.
//!
//! The shell talks to exactly one wallet connector per session, selected
//! by a configuration flag: Privy for embedded-wallet logins or
//! WalletConnect for external wallets. Connectors are expensive to bring
//! up, so [`ConnectorSlot`] defers construction until the first caller
//! actually needs one and caches it for the rest of the session.
//!
//! Connectors are also the source of [`ChainChanged`] events: whenever
//! the user switches chains inside their wallet, the embedding calls
//! [`ConnectorProvider::report_chain_changed`] and the reconciler picks
//! the event up on the other end of the channel.

use crate::config::ShellConfig;
use crate::network::{ChainAllowList, NetworkId};
use log::{debug, warn};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::OnceCell;

/// A wallet-reported chain switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainChanged {
    pub chain_id: u64,
    /// Whether the newly connected chain is a test network.
    pub is_testnet: bool,
}

impl ChainChanged {
    /// The network identity implied by the reported chain.
    #[must_use]
    pub const fn network(&self) -> NetworkId {
        NetworkId::from_testnet_flag(self.is_testnet)
    }
}

/// Which connector implementation the session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorKind {
    Privy,
    WalletConnect,
}

impl ConnectorKind {
    /// Maps the `use_privy` configuration flag to a connector kind.
    #[must_use]
    pub const fn from_flag(use_privy: bool) -> Self {
        if use_privy {
            Self::Privy
        } else {
            Self::WalletConnect
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Privy => "privy",
            Self::WalletConnect => "walletconnect",
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to bring a connector up, extracted once from the
/// shell configuration.
#[derive(Debug, Clone, Default)]
pub struct ConnectorSettings {
    pub privy_app_id: Option<String>,
    pub walletconnect_project_id: Option<String>,
    pub allow_list: ChainAllowList,
}

impl ConnectorSettings {
    #[must_use]
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            privy_app_id: config.privy_app_id.clone(),
            walletconnect_project_id: config.walletconnect_project_id.clone(),
            allow_list: config.chain_allow_list(),
        }
    }
}

/// Capability surface the shell needs from a wallet connector.
///
/// Methods are synchronous so the trait stays object-safe; connector
/// construction is where the slow work lives, behind [`ConnectorSlot`].
pub trait ConnectorProvider: Send + Sync {
    fn kind(&self) -> ConnectorKind;

    /// Whether the connector has the credentials it needs to sign users
    /// in. A connector without credentials still boots; only login-time
    /// operations degrade.
    fn has_credentials(&self) -> bool;

    /// Chain IDs the connector may offer on `network`. Empty means any.
    fn permitted_chains(&self, network: NetworkId) -> Vec<u64>;

    /// Forwards a wallet-reported chain switch to whoever holds the
    /// receiving end. Dropped silently once the receiver is gone.
    fn report_chain_changed(&self, event: ChainChanged);
}

/// Embedded-wallet connector backed by Privy.
pub struct PrivyProvider {
    app_id: Option<String>,
    allow_list: ChainAllowList,
    events: mpsc::UnboundedSender<ChainChanged>,
}

impl PrivyProvider {
    #[must_use]
    pub fn new(settings: &ConnectorSettings, events: mpsc::UnboundedSender<ChainChanged>) -> Self {
        if settings.privy_app_id.is_none() {
            warn!("privy connector selected without an app id; logins will be unavailable");
        }
        Self {
            app_id: settings.privy_app_id.clone(),
            allow_list: settings.allow_list.clone(),
            events,
        }
    }
}

impl ConnectorProvider for PrivyProvider {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Privy
    }

    fn has_credentials(&self) -> bool {
        self.app_id.is_some()
    }

    fn permitted_chains(&self, network: NetworkId) -> Vec<u64> {
        self.allow_list.allowed_on(network).to_vec()
    }

    fn report_chain_changed(&self, event: ChainChanged) {
        if self.events.send(event).is_err() {
            warn!("chain event dropped: no reconciler is listening");
        }
    }
}

/// External-wallet connector backed by WalletConnect.
pub struct WalletConnectProvider {
    project_id: Option<String>,
    allow_list: ChainAllowList,
    events: mpsc::UnboundedSender<ChainChanged>,
}

impl WalletConnectProvider {
    #[must_use]
    pub fn new(settings: &ConnectorSettings, events: mpsc::UnboundedSender<ChainChanged>) -> Self {
        if settings.walletconnect_project_id.is_none() {
            warn!("walletconnect connector selected without a project id; pairing will be unavailable");
        }
        Self {
            project_id: settings.walletconnect_project_id.clone(),
            allow_list: settings.allow_list.clone(),
            events,
        }
    }
}

impl ConnectorProvider for WalletConnectProvider {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::WalletConnect
    }

    fn has_credentials(&self) -> bool {
        self.project_id.is_some()
    }

    fn permitted_chains(&self, network: NetworkId) -> Vec<u64> {
        self.allow_list.allowed_on(network).to_vec()
    }

    fn report_chain_changed(&self, event: ChainChanged) {
        if self.events.send(event).is_err() {
            warn!("chain event dropped: no reconciler is listening");
        }
    }
}

/// Lazily constructed, session-cached connector.
///
/// Holds the construction ingredients and defers the build until the
/// first [`get`](Self::get); every later call returns the cached
/// instance. Concurrent first callers race on a single initialization.
pub struct ConnectorSlot {
    kind: ConnectorKind,
    settings: ConnectorSettings,
    events: mpsc::UnboundedSender<ChainChanged>,
    cell: OnceCell<Arc<dyn ConnectorProvider>>,
}

impl ConnectorSlot {
    #[must_use]
    pub fn new(
        kind: ConnectorKind,
        settings: ConnectorSettings,
        events: mpsc::UnboundedSender<ChainChanged>,
    ) -> Self {
        Self {
            kind,
            settings,
            events,
            cell: OnceCell::new(),
        }
    }

    /// The connector, constructing it on first need.
    pub async fn get(&self) -> &Arc<dyn ConnectorProvider> {
        self.cell
            .get_or_init(|| async {
                debug!("constructing {} connector", self.kind);
                build_connector(self.kind, &self.settings, self.events.clone())
            })
            .await
    }

    /// Whether the connector has been constructed yet.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.cell.initialized()
    }

    #[must_use]
    pub const fn kind(&self) -> ConnectorKind {
        self.kind
    }
}

fn build_connector(
    kind: ConnectorKind,
    settings: &ConnectorSettings,
    events: mpsc::UnboundedSender<ChainChanged>,
) -> Arc<dyn ConnectorProvider> {
    match kind {
        ConnectorKind::Privy => Arc::new(PrivyProvider::new(settings, events)),
        ConnectorKind::WalletConnect => Arc::new(WalletConnectProvider::new(settings, events)),
    }
}
