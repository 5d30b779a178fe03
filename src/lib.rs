// SPDX-License-Identifier: MPL-2.0
//! `tradeshell` is the bootstrap core of an internationalized,
//! multi-network trading terminal.
//!
//! It resolves the active network identity (policy first, persisted
//! preference second, mainnet last), loads per-language translation
//! resources over HTTP with graceful degradation, picks the language to
//! render first, and keeps the persisted network consistent with
//! whatever chain the user's wallet wanders off to.

#![doc(html_root_url = "https://docs.rs/tradeshell/0.1.0")]

pub mod config;
pub mod error;
pub mod locale;
pub mod network;
pub mod shell;
pub mod wallet;

#[cfg(test)]
mod test_utils;
