// SPDX-License-Identifier: MPL-2.0
//! Reconciliation between wallet-reported chains and the persisted
//! network identity.
//!
//! The wallet is free to switch chains behind the shell's back. When a
//! reported chain disagrees with the active network identity, the
//! reconciler rewrites the persisted slot and forces a full relaunch
//! rather than trying to hot-swap every network-dependent subsystem: a
//! restart is the only way to guarantee a consistent world afterwards.
//! Agreeing reports, the common case, do nothing.

use super::store::NetworkIdentityStore;
use crate::config::defaults::RELOAD_DELAY_MS;
use crate::wallet::ChainChanged;
use log::{debug, info};
use std::time::Duration;
use tokio::sync::mpsc;

/// Capability to force a full shell relaunch.
///
/// The host loop decides what "relaunch" means; the reconciler only
/// requests one.
pub trait ReloadHandle: Send + Sync {
    fn request_reload(&self);
}

impl<T: ReloadHandle + ?Sized> ReloadHandle for std::sync::Arc<T> {
    fn request_reload(&self) {
        (**self).request_reload();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Persisted identity and wallet agree.
    Consistent,
    /// A divergence was persisted; the relaunch is on its way.
    Reloading,
}

/// Watches chain events and restores identity consistency by relaunch.
pub struct NetworkReconciler<R> {
    store: NetworkIdentityStore,
    reload: R,
    state: State,
}

impl<R: ReloadHandle> NetworkReconciler<R> {
    #[must_use]
    pub fn new(store: NetworkIdentityStore, reload: R) -> Self {
        Self {
            store,
            reload,
            state: State::Consistent,
        }
    }

    /// Processes one chain report. Returns `true` when the report
    /// diverged and the persisted identity was rewritten.
    ///
    /// The comparison is against the resolved active network, so a
    /// policy-forced identity is honored over the raw slot value.
    fn reconcile(&mut self, event: ChainChanged) -> bool {
        if self.state == State::Reloading {
            debug!(
                "ignoring chain {} report: relaunch already pending",
                event.chain_id
            );
            return false;
        }

        let reported = event.network();
        let active = self.store.active();
        if reported == active {
            debug!(
                "chain {} agrees with active network {active}",
                event.chain_id
            );
            return false;
        }

        info!(
            "wallet moved to chain {} on {reported}; switching over from {active}",
            event.chain_id
        );
        self.store.set_active(reported);
        self.state = State::Reloading;
        true
    }

    /// Consumes chain events until one diverges or the sender hangs up.
    ///
    /// On divergence the new identity is persisted first, then after a
    /// short flush delay exactly one relaunch is requested and the
    /// reconciler retires. Events queued behind the divergent one are
    /// never acted on; the relaunched shell sees a consistent world.
    pub async fn watch(mut self, mut events: mpsc::UnboundedReceiver<ChainChanged>) {
        while let Some(event) = events.recv().await {
            if self.reconcile(event) {
                tokio::time::sleep(Duration::from_millis(RELOAD_DELAY_MS)).await;
                self.reload.request_reload();
                return;
            }
        }
        debug!("chain event stream closed; reconciler exiting");
    }
}
