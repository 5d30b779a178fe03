// SPDX-License-Identifier: MPL-2.0
//! Multi-language resource loading over HTTP.
//!
//! For every requested language the loader fetches two documents
//! concurrently: the required base file `{base}/locales/{code}.json` and
//! an optional overlay `{base}/locales/extend/{code}.json`. The overlay is
//! merged over the base; overlay failures of any kind are absorbed with a
//! warning, while a base failure writes off that one language without
//! disturbing its siblings. The load settles only once every language has
//! either produced a document or been written off; the locale provider
//! cannot come up with a half-known catalog, so the slowest language bounds
//! boot latency.

use super::{
    catalog_entry, merge_documents, LanguageCode, LocaleBundle, ResourceDocument,
};
use futures_util::future::join_all;
use log::{debug, error, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;

/// Errors a single document fetch can produce.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// The request never completed (DNS, connect, TLS, body transport).
    Transport(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The body was not parseable JSON.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "transport error: {msg}"),
            FetchError::Status(code) => write!(f, "unexpected HTTP status {code}"),
            FetchError::Parse(msg) => write!(f, "invalid JSON: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Source of raw JSON documents, keyed by absolute URL.
///
/// The production implementation is [`HttpResourceFetcher`]; tests inject
/// an in-memory table. Implementations report failures through
/// [`FetchError`] and leave fallback policy to the loader.
pub trait ResourceFetcher: Send + Sync {
    /// Fetches and parses one JSON document.
    fn fetch_json(&self, url: &str) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Fetches documents from the resource origin over HTTP.
#[derive(Debug, Clone)]
pub struct HttpResourceFetcher {
    client: reqwest::Client,
}

impl HttpResourceFetcher {
    /// Builds the fetcher with an explicit redirect policy and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed, which
    /// only happens when the TLS backend fails to initialize.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("TradeShell/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl ResourceFetcher for HttpResourceFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Loads and merges translation documents for a set of languages.
pub struct LocaleLoader<F> {
    fetcher: F,
    base_url: String,
}

impl<F: ResourceFetcher> LocaleLoader<F> {
    /// A loader rooted at `base_url`. Trailing slashes are tolerated.
    #[must_use]
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { fetcher, base_url }
    }

    fn base_document_url(&self, code: &LanguageCode) -> String {
        format!("{}/locales/{}.json", self.base_url, code)
    }

    fn overlay_document_url(&self, code: &LanguageCode) -> String {
        format!("{}/locales/extend/{}.json", self.base_url, code)
    }

    /// Loads every requested language in parallel and assembles the boot
    /// bundle.
    ///
    /// Duplicate codes are loaded once, request order is preserved, and
    /// the call returns only after every language attempt has settled.
    /// Failed languages are simply absent from the result; an all-failure
    /// load yields an empty catalog rather than an error.
    pub async fn load(
        &self,
        requested: &[LanguageCode],
        default_language: LanguageCode,
    ) -> LocaleBundle {
        let mut codes: Vec<&LanguageCode> = Vec::new();
        for code in requested {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }

        let settled = join_all(codes.iter().map(|code| self.load_language(code))).await;

        let mut resources = HashMap::new();
        let mut catalog = Vec::new();
        for (code, document) in settled.into_iter().flatten() {
            if let Some(entry) = catalog_entry(&code) {
                catalog.push(entry);
            } else {
                debug!("locale {code}: loaded but not in the master catalog; no menu entry");
            }
            resources.insert(code, document);
        }

        debug!(
            "locale bundle ready: {} of {} languages loaded",
            resources.len(),
            codes.len()
        );

        LocaleBundle {
            resources,
            catalog,
            default_language,
        }
    }

    /// Loads one language: base and overlay fetched concurrently, merged
    /// right-biased. `None` means the language failed as a unit.
    async fn load_language(&self, code: &LanguageCode) -> Option<(LanguageCode, ResourceDocument)> {
        let base_url = self.base_document_url(code);
        let overlay_url = self.overlay_document_url(code);
        let (base, overlay) = tokio::join!(
            self.fetcher.fetch_json(&base_url),
            self.fetcher.fetch_json(&overlay_url),
        );

        let base = match base {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                error!("locale {code}: base document is not a JSON object; language skipped");
                return None;
            }
            Err(err) => {
                error!("locale {code}: base document failed to load ({err}); language skipped");
                return None;
            }
        };

        let overlay = match overlay {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("locale {code}: overlay is not a JSON object; using base only");
                ResourceDocument::new()
            }
            Err(err) => {
                warn!("locale {code}: overlay unavailable ({err}); using base only");
                ResourceDocument::new()
            }
        };

        Some((code.clone(), merge_documents(base, overlay)))
    }
}
