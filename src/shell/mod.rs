// SPDX-License-Identifier: MPL-2.0
//! Boot orchestration.
//!
//! [`boot`] brings the four shell subsystems up in order: the network
//! identity store answers first (policy, then persisted slot), locale
//! resources load while the render language is chosen, the wallet
//! connector is parked behind its lazy slot, and the chain watcher is
//! spawned last. Nothing in here returns an error: every subsystem
//! degrades to a safe default, and the worst possible boot is an
//! English-only catalog on mainnet.

pub mod launch;
pub mod paths;

pub use launch::LaunchContext;

use crate::config::ShellConfig;
use crate::locale::loader::ResourceFetcher;
use crate::locale::{resolve_language, LanguageCode, LocaleBundle, LocaleLoader};
use crate::network::reconciler::ReloadHandle;
use crate::network::store::{FileNetworkSlot, NetworkSlot};
use crate::network::{NetworkId, NetworkIdentityStore, NetworkReconciler};
use crate::wallet::{ChainChanged, ConnectorKind, ConnectorSettings, ConnectorSlot};
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;

/// Host capabilities, probed once at startup and passed in explicitly so
/// tests can boot against any combination.
#[derive(Debug, Clone, Default)]
pub struct HostEnv {
    /// Where durable state lives; `None` means no persistent storage.
    pub data_dir: Option<PathBuf>,
    /// The platform's reported locale, verbatim.
    pub system_locale: Option<String>,
}

impl HostEnv {
    /// Probes the real host.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            data_dir: paths::get_app_data_dir(),
            system_locale: sys_locale::get_locale(),
        }
    }

    /// An environment with no capabilities at all.
    #[must_use]
    pub fn headless() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_persistent_storage(&self) -> bool {
        self.data_dir.is_some()
    }
}

/// Relaunch doorbell connecting the reconciler to the host loop.
///
/// A request arriving before anyone waits is not lost; the next
/// [`wait`](Self::wait) returns immediately.
#[derive(Debug, Default)]
pub struct ReloadSignal {
    notify: Notify,
}

impl ReloadSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves once a relaunch has been requested.
    pub async fn wait(&self) {
        self.notify.notified().await;
    }
}

impl ReloadHandle for ReloadSignal {
    fn request_reload(&self) {
        self.notify.notify_one();
    }
}

/// Everything the provider tree needs, produced by [`boot`].
pub struct BootedShell {
    /// The network identity resolved for this session.
    pub network: NetworkId,
    /// Store shared with the chain watcher; user-driven network switches
    /// go through here too.
    pub store: NetworkIdentityStore,
    /// Merged translation resources, menu catalog, and chosen language.
    pub locale: LocaleBundle,
    /// The wallet connector, deferred until first need.
    pub connectors: ConnectorSlot,
    /// The chain watcher task, alive for the whole session.
    pub watcher: JoinHandle<()>,
}

impl BootedShell {
    /// The language chosen for first render.
    #[must_use]
    pub fn language(&self) -> &LanguageCode {
        &self.locale.default_language
    }
}

/// Brings the shell up.
///
/// The resolved network identity is read once; locale resources for the
/// configured languages are fetched behind an all-settle barrier; the
/// chain watcher owns the receiving end of the connector's event channel
/// and relaunches the shell through `reload` when the wallet walks off
/// to a different network.
pub async fn boot<F, R>(
    config: &ShellConfig,
    env: &HostEnv,
    fetcher: F,
    launch: Option<&mut LaunchContext>,
    reload: R,
) -> BootedShell
where
    F: ResourceFetcher,
    R: ReloadHandle + 'static,
{
    let policy = config.network_policy();
    let slot = env
        .data_dir
        .clone()
        .map(|dir| Arc::new(FileNetworkSlot::new(dir)) as Arc<dyn NetworkSlot>);
    if slot.is_none() {
        debug!("no persistent storage; network identity will not survive this session");
    }
    let store = NetworkIdentityStore::new(policy, slot);
    let network = store.active();
    info!("active network: {network}");

    let available = config.available_languages();
    let language = resolve_language(
        launch,
        config.seo_language(),
        env.system_locale.as_deref(),
        &available,
    );

    let loader = LocaleLoader::new(fetcher, config.resource_base_url());
    let locale = loader.load(&available, language).await;
    info!(
        "locale ready: {} of {} languages, starting in {}",
        locale.catalog.len(),
        available.len(),
        locale.default_language
    );

    let (events_tx, events_rx) = mpsc::unbounded_channel::<ChainChanged>();
    let connectors = ConnectorSlot::new(
        ConnectorKind::from_flag(config.use_privy()),
        ConnectorSettings::from_config(config),
        events_tx,
    );
    debug!("wallet connector deferred: {}", connectors.kind());

    let reconciler = NetworkReconciler::new(store.clone(), reload);
    let watcher = tokio::spawn(reconciler.watch(events_rx));

    BootedShell {
        network,
        store,
        locale,
        connectors,
        watcher,
    }
}
