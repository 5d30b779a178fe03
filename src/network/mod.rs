// SPDX-License-Identifier: MPL-2.0
//! Network identity: which blockchain environment the terminal runs against.
//!
//! The terminal targets exactly one logical environment at a time, mainnet
//! or testnet. This module holds the identity type itself, the static
//! policy flags that can pin the choice, and the per-network chain
//! allow-lists built from configuration. Persistence and reconciliation
//! against live wallet events live in the [`store`] and [`reconciler`]
//! submodules.

pub mod reconciler;
pub mod store;

pub use reconciler::{NetworkReconciler, ReloadHandle};
pub use store::{FileNetworkSlot, MemoryNetworkSlot, NetworkIdentityStore, NetworkSlot};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The logical blockchain environment (mainnet or testnet).
///
/// Persisted as its literal string form; absence always resolves to
/// [`NetworkId::Mainnet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    #[default]
    Mainnet,
    Testnet,
}

impl NetworkId {
    /// The literal string stored in the persisted slot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NetworkId::Mainnet => "mainnet",
            NetworkId::Testnet => "testnet",
        }
    }

    /// Parses a persisted literal. Anything unrecognized is treated as
    /// unset by callers, never as an error.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "mainnet" => Some(NetworkId::Mainnet),
            "testnet" => Some(NetworkId::Testnet),
            _ => None,
        }
    }

    /// Whether this identity is the test environment.
    #[must_use]
    pub const fn is_testnet(self) -> bool {
        matches!(self, NetworkId::Testnet)
    }

    /// The identity implied by a wallet-reported testnet flag.
    #[must_use]
    pub const fn from_testnet_flag(is_testnet: bool) -> Self {
        if is_testnet {
            NetworkId::Testnet
        } else {
            NetworkId::Mainnet
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static policy flags that can pin the terminal to one environment.
///
/// Derived from configuration at boot; never persisted. A policy override
/// wins over the persisted preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkPolicy {
    pub mainnet_disabled: bool,
    pub testnet_disabled: bool,
}

impl NetworkPolicy {
    /// The network forced by policy, when exactly one flag is set.
    ///
    /// Both flags set is almost certainly a misconfiguration; it falls
    /// through to the persisted preference exactly like the no-flag case.
    /// The store logs a warning when resolving under that combination.
    #[must_use]
    pub const fn forced_network(self) -> Option<NetworkId> {
        match (self.mainnet_disabled, self.testnet_disabled) {
            (true, false) => Some(NetworkId::Testnet),
            (false, true) => Some(NetworkId::Mainnet),
            _ => None,
        }
    }

    /// True when both environments are flagged off at once.
    #[must_use]
    pub const fn is_contradictory(self) -> bool {
        self.mainnet_disabled && self.testnet_disabled
    }
}

/// Per-network chain IDs the wallet connectors may offer.
///
/// Built once per boot from the comma-separated configuration strings.
/// An empty list places no restriction on that network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainAllowList {
    mainnet: Vec<u64>,
    testnet: Vec<u64>,
}

impl ChainAllowList {
    /// Builds the allow-list from configuration strings, one per network.
    #[must_use]
    pub fn from_config(mainnet: &str, testnet: &str) -> Self {
        Self {
            mainnet: parse_chain_ids(mainnet),
            testnet: parse_chain_ids(testnet),
        }
    }

    /// Chain IDs permitted on the given network. Empty means unrestricted.
    #[must_use]
    pub fn allowed_on(&self, network: NetworkId) -> &[u64] {
        match network {
            NetworkId::Mainnet => &self.mainnet,
            NetworkId::Testnet => &self.testnet,
        }
    }

    /// Whether a chain may be offered on the given network.
    #[must_use]
    pub fn permits(&self, network: NetworkId, chain_id: u64) -> bool {
        let allowed = self.allowed_on(network);
        allowed.is_empty() || allowed.contains(&chain_id)
    }
}

/// Splits a comma-separated chain-ID string into numeric IDs.
///
/// Entries that fail to parse are dropped without complaint: the
/// configuration surface is environment-style text and a typo in one entry
/// must not take the boot down. `"1, abc, 42"` yields `[1, 42]`.
#[must_use]
pub fn parse_chain_ids(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|entry| entry.trim().parse::<u64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_known_literals() {
        assert_eq!(NetworkId::parse("mainnet"), Some(NetworkId::Mainnet));
        assert_eq!(NetworkId::parse(" testnet\n"), Some(NetworkId::Testnet));
        assert_eq!(NetworkId::parse("MAINNET"), None);
        assert_eq!(NetworkId::parse(""), None);
        assert_eq!(NetworkId::parse("devnet"), None);
    }

    #[test]
    fn display_matches_persisted_literal() {
        assert_eq!(NetworkId::Mainnet.to_string(), "mainnet");
        assert_eq!(NetworkId::Testnet.to_string(), "testnet");
    }

    #[test]
    fn default_network_is_mainnet() {
        assert_eq!(NetworkId::default(), NetworkId::Mainnet);
    }

    #[test]
    fn testnet_flag_maps_to_identity() {
        assert_eq!(NetworkId::from_testnet_flag(true), NetworkId::Testnet);
        assert_eq!(NetworkId::from_testnet_flag(false), NetworkId::Mainnet);
        assert!(NetworkId::Testnet.is_testnet());
        assert!(!NetworkId::Mainnet.is_testnet());
    }

    #[test]
    fn single_disabled_flag_forces_the_other_network() {
        let policy = NetworkPolicy {
            mainnet_disabled: true,
            testnet_disabled: false,
        };
        assert_eq!(policy.forced_network(), Some(NetworkId::Testnet));

        let policy = NetworkPolicy {
            mainnet_disabled: false,
            testnet_disabled: true,
        };
        assert_eq!(policy.forced_network(), Some(NetworkId::Mainnet));
    }

    #[test]
    fn no_flags_and_both_flags_force_nothing() {
        assert_eq!(NetworkPolicy::default().forced_network(), None);

        let both = NetworkPolicy {
            mainnet_disabled: true,
            testnet_disabled: true,
        };
        assert_eq!(both.forced_network(), None);
        assert!(both.is_contradictory());
    }

    #[test]
    fn chain_id_parsing_drops_malformed_entries() {
        assert_eq!(parse_chain_ids("1, abc, 42"), vec![1, 42]);
        assert_eq!(parse_chain_ids(""), Vec::<u64>::new());
        assert_eq!(parse_chain_ids(" 10 ,,0x5"), vec![10]);
    }

    #[test]
    fn empty_allow_list_permits_everything() {
        let list = ChainAllowList::from_config("", "");
        assert!(list.permits(NetworkId::Mainnet, 1));
        assert!(list.permits(NetworkId::Testnet, 421_614));
    }

    #[test]
    fn populated_allow_list_restricts_per_network() {
        let list = ChainAllowList::from_config("42161, 1", "421614");
        assert!(list.permits(NetworkId::Mainnet, 1));
        assert!(list.permits(NetworkId::Mainnet, 42_161));
        assert!(!list.permits(NetworkId::Mainnet, 421_614));
        assert!(list.permits(NetworkId::Testnet, 421_614));
        assert!(!list.permits(NetworkId::Testnet, 1));
        assert_eq!(list.allowed_on(NetworkId::Mainnet), &[42_161, 1]);
    }
}
