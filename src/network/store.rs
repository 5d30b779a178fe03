// SPDX-License-Identifier: MPL-2.0
//! Persisted network preference with policy-first resolution.
//!
//! The active network lives in a single named slot of durable client
//! storage: one file containing the literal string `mainnet` or `testnet`.
//! Reads never fail (a missing, unreadable, or unrecognized slot resolves
//! to the mainnet default) and writes are fire-and-forget. Hosts without
//! durable storage (a pre-render pass, a sandboxed test) construct the
//! store without a slot and get the same defaults with no-op writes.
//! Identity resolution must never block boot.

use super::{NetworkId, NetworkPolicy};
use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// File name of the persisted slot inside the application data directory.
pub const NETWORK_SLOT_FILE: &str = "network";

/// A single durable slot for the network preference.
///
/// Implementations treat failure as absence: `load` answers `None` for
/// anything it cannot read or recognize, and `store` absorbs write errors.
pub trait NetworkSlot: Send + Sync {
    /// Reads the persisted preference, if a recognizable one exists.
    fn load(&self) -> Option<NetworkId>;

    /// Persists the preference. Best effort; errors are absorbed.
    fn store(&self, network: NetworkId);
}

/// Slot kept as a one-line file under the application data directory.
#[derive(Debug, Clone)]
pub struct FileNetworkSlot {
    path: PathBuf,
}

impl FileNetworkSlot {
    /// Creates the slot at its conventional location inside `data_dir`.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        let mut path = data_dir;
        path.push(NETWORK_SLOT_FILE);
        Self { path }
    }

    /// Full path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NetworkSlot for FileNetworkSlot {
    fn load(&self) -> Option<NetworkId> {
        let contents = fs::read_to_string(&self.path).ok()?;
        NetworkId::parse(&contents)
    }

    fn store(&self, network: NetworkId) {
        if let Some(parent) = self.path.parent() {
            if fs::create_dir_all(parent).is_err() {
                warn!(
                    "network slot directory {} could not be created; preference not persisted",
                    parent.display()
                );
                return;
            }
        }
        if fs::write(&self.path, network.as_str()).is_err() {
            warn!(
                "network slot {} could not be written; preference not persisted",
                self.path.display()
            );
        }
    }
}

/// In-memory slot for tests and for hosts that only want within-session
/// persistence.
#[derive(Debug, Default)]
pub struct MemoryNetworkSlot {
    value: Mutex<Option<NetworkId>>,
}

impl MemoryNetworkSlot {
    #[must_use]
    pub fn new(initial: Option<NetworkId>) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }
}

impl NetworkSlot for MemoryNetworkSlot {
    fn load(&self) -> Option<NetworkId> {
        // A poisoned lock degrades to absence, like any other read failure.
        self.value.lock().ok().and_then(|guard| *guard)
    }

    fn store(&self, network: NetworkId) {
        if let Ok(mut guard) = self.value.lock() {
            *guard = Some(network);
        }
    }
}

/// Resolves and persists the active network, policy first.
///
/// This is the only writer of the persisted slot. The boot sequence reads
/// it once to pick the provider environment; the reconciler reads and
/// writes it when the wallet reports a chain on the other environment.
#[derive(Clone)]
pub struct NetworkIdentityStore {
    policy: NetworkPolicy,
    slot: Option<Arc<dyn NetworkSlot>>,
}

impl NetworkIdentityStore {
    /// A store backed by the given slot. Pass `None` on hosts that grant
    /// no durable storage; the store then resolves to defaults and writes
    /// become no-ops.
    #[must_use]
    pub fn new(policy: NetworkPolicy, slot: Option<Arc<dyn NetworkSlot>>) -> Self {
        Self { policy, slot }
    }

    /// The active network.
    ///
    /// Policy is evaluated first: with exactly one environment disabled,
    /// the other is returned unconditionally. Otherwise the persisted
    /// preference applies, defaulting to mainnet when the slot is absent,
    /// unreadable, or unrecognized.
    #[must_use]
    pub fn active(&self) -> NetworkId {
        if let Some(forced) = self.policy.forced_network() {
            return forced;
        }
        if self.policy.is_contradictory() {
            warn!("both networks are disabled by policy; using the persisted preference");
        }
        self.slot
            .as_deref()
            .and_then(NetworkSlot::load)
            .unwrap_or_default()
    }

    /// Persists a new preference. A no-op without storage; never errors
    /// and never triggers a reload by itself.
    pub fn set_active(&self, network: NetworkId) {
        match &self.slot {
            Some(slot) => slot.store(network),
            None => debug!("no durable storage; network preference {network} not persisted"),
        }
    }

    /// The policy this store resolves under.
    #[must_use]
    pub const fn policy(&self) -> NetworkPolicy {
        self.policy
    }
}

impl fmt::Debug for NetworkIdentityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkIdentityStore")
            .field("policy", &self.policy)
            .field("has_slot", &self.slot.is_some())
            .finish()
    }
}
