// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for the shell's configuration surface.
//!
//! Single source of truth for every fallback the typed accessors in
//! [`crate::config`] hand out when a setting is absent.

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Origin serving `locales/{code}.json` and `locales/extend/{code}.json`.
pub const DEFAULT_RESOURCE_BASE_URL: &str = "https://static.tradeshell.app";

// ==========================================================================
// Network Defaults
// ==========================================================================

/// Delay between persisting a reconciled network identity and forcing the
/// relaunch, giving the slot write and in-flight state time to flush.
pub const RELOAD_DELAY_MS: u64 = 100;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(RELOAD_DELAY_MS > 0);
    assert!(RELOAD_DELAY_MS < 10_000);
    assert!(!DEFAULT_RESOURCE_BASE_URL.is_empty());
};
