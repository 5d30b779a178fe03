// SPDX-License-Identifier: MPL-2.0
//! Shell configuration: a `shell.toml` file overlaid with
//! environment-style settings.
//!
//! All fields are optional strings or flags; typed views with safe
//! defaults are exposed through accessor methods, so a missing or
//! malformed value can never abort the boot.
//!
//! # Examples
//!
//! ```no_run
//! use tradeshell::config;
//!
//! let mut config = config::load().unwrap_or_default();
//! config.languages = Some("en,fr".to_string());
//! config.overlay_env();
//! config::save(&config).expect("failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use crate::locale::{parse_language_list, LanguageCode};
use crate::network::{ChainAllowList, NetworkPolicy};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "shell.toml";

// ==========================================================================
// Environment variable names
// ==========================================================================

pub const ENV_DISABLE_MAINNET: &str = "TRADESHELL_DISABLE_MAINNET";
pub const ENV_DISABLE_TESTNET: &str = "TRADESHELL_DISABLE_TESTNET";
pub const ENV_MAINNET_CHAIN_IDS: &str = "TRADESHELL_MAINNET_CHAIN_IDS";
pub const ENV_TESTNET_CHAIN_IDS: &str = "TRADESHELL_TESTNET_CHAIN_IDS";
pub const ENV_LANGUAGES: &str = "TRADESHELL_LANGUAGES";
pub const ENV_RESOURCE_BASE_URL: &str = "TRADESHELL_RESOURCE_BASE_URL";
pub const ENV_SEO_LANGUAGE: &str = "TRADESHELL_SEO_LANGUAGE";
pub const ENV_USE_PRIVY: &str = "TRADESHELL_USE_PRIVY";
pub const ENV_PRIVY_APP_ID: &str = "TRADESHELL_PRIVY_APP_ID";
pub const ENV_WALLETCONNECT_PROJECT_ID: &str = "TRADESHELL_WALLETCONNECT_PROJECT_ID";

/// Raw configuration as written in `shell.toml`.
///
/// List-valued settings (languages, chain IDs) are comma-separated
/// strings so the file and the environment share one format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub disable_mainnet: Option<bool>,
    #[serde(default)]
    pub disable_testnet: Option<bool>,
    /// Comma-separated chain IDs permitted on mainnet; empty means any.
    #[serde(default)]
    pub mainnet_chain_ids: Option<String>,
    /// Comma-separated chain IDs permitted on testnet; empty means any.
    #[serde(default)]
    pub testnet_chain_ids: Option<String>,
    /// Comma-separated language codes to offer, in menu order.
    #[serde(default)]
    pub languages: Option<String>,
    /// Origin serving the translation documents.
    #[serde(default)]
    pub resource_base_url: Option<String>,
    /// Language implied by the content/SEO build, if any.
    #[serde(default)]
    pub seo_language: Option<String>,
    /// Selects the Privy connector instead of WalletConnect.
    #[serde(default)]
    pub use_privy: Option<bool>,
    #[serde(default)]
    pub privy_app_id: Option<String>,
    #[serde(default)]
    pub walletconnect_project_id: Option<String>,
}

impl ShellConfig {
    /// Applies environment variables over the file-sourced values.
    ///
    /// Set variables win; unset or unrecognizable ones leave the file
    /// value untouched.
    pub fn overlay_env(&mut self) {
        if let Some(value) = env_flag(ENV_DISABLE_MAINNET) {
            self.disable_mainnet = Some(value);
        }
        if let Some(value) = env_flag(ENV_DISABLE_TESTNET) {
            self.disable_testnet = Some(value);
        }
        if let Some(value) = env_string(ENV_MAINNET_CHAIN_IDS) {
            self.mainnet_chain_ids = Some(value);
        }
        if let Some(value) = env_string(ENV_TESTNET_CHAIN_IDS) {
            self.testnet_chain_ids = Some(value);
        }
        if let Some(value) = env_string(ENV_LANGUAGES) {
            self.languages = Some(value);
        }
        if let Some(value) = env_string(ENV_RESOURCE_BASE_URL) {
            self.resource_base_url = Some(value);
        }
        if let Some(value) = env_string(ENV_SEO_LANGUAGE) {
            self.seo_language = Some(value);
        }
        if let Some(value) = env_flag(ENV_USE_PRIVY) {
            self.use_privy = Some(value);
        }
        if let Some(value) = env_string(ENV_PRIVY_APP_ID) {
            self.privy_app_id = Some(value);
        }
        if let Some(value) = env_string(ENV_WALLETCONNECT_PROJECT_ID) {
            self.walletconnect_project_id = Some(value);
        }
    }

    /// The network-availability policy. Unset flags read as "enabled".
    #[must_use]
    pub fn network_policy(&self) -> NetworkPolicy {
        NetworkPolicy {
            mainnet_disabled: self.disable_mainnet.unwrap_or(false),
            testnet_disabled: self.disable_testnet.unwrap_or(false),
        }
    }

    /// Per-network chain restrictions. Unset lists mean "unrestricted".
    #[must_use]
    pub fn chain_allow_list(&self) -> ChainAllowList {
        ChainAllowList::from_config(
            self.mainnet_chain_ids.as_deref().unwrap_or(""),
            self.testnet_chain_ids.as_deref().unwrap_or(""),
        )
    }

    /// The language allow-list, never empty: a missing or entirely
    /// malformed list degrades to `["en"]`.
    #[must_use]
    pub fn available_languages(&self) -> Vec<LanguageCode> {
        let parsed = match self.languages.as_deref() {
            Some(raw) => parse_language_list(raw.split(',')),
            None => Vec::new(),
        };
        if parsed.is_empty() {
            vec![LanguageCode::fallback()]
        } else {
            parsed
        }
    }

    #[must_use]
    pub fn resource_base_url(&self) -> &str {
        self.resource_base_url
            .as_deref()
            .unwrap_or(defaults::DEFAULT_RESOURCE_BASE_URL)
    }

    #[must_use]
    pub fn seo_language(&self) -> Option<&str> {
        self.seo_language.as_deref()
    }

    /// Whether the Privy connector is selected. Defaults to
    /// WalletConnect when unset.
    #[must_use]
    pub fn use_privy(&self) -> bool {
        self.use_privy.unwrap_or(false)
    }
}

/// A non-empty string variable from the environment.
fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// A boolean variable from the environment. Unrecognized values are
/// ignored rather than coerced, so they cannot silently flip a flag.
fn env_flag(name: &str) -> Option<bool> {
    let raw = env_string(name)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            warn!("{name}={other} is not a recognized flag value; ignoring it");
            None
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    crate::shell::paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads `shell.toml` from the config directory, or the defaults when
/// the file does not exist.
pub fn load() -> Result<ShellConfig> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(ShellConfig::default())
}

/// Writes the configuration to `shell.toml` in the config directory.
pub fn save(config: &ShellConfig) -> Result<()> {
    if let Some(path) = default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a configuration file from an explicit path. Unparseable
/// content degrades to the defaults rather than failing the boot.
pub fn load_from_path(path: &Path) -> Result<ShellConfig> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            warn!("{} is not valid TOML ({err}); using defaults", path.display());
            Ok(ShellConfig::default())
        }
    }
}

/// Saves a configuration file to an explicit path, creating parent
/// directories as needed.
pub fn save_to_path(config: &ShellConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
