// SPDX-License-Identifier: MPL-2.0
//! Locale catalog model: language codes, the master language list, and
//! resource-document merging.
//!
//! Translation resources are flat JSON key/value documents fetched per
//! language at boot. This module holds the pieces that do not touch the
//! network: the validated [`LanguageCode`] type, the static master list a
//! session's catalog is filtered against, and the right-biased merge that
//! lays an extension document over its base. Fetching lives in [`loader`],
//! boot-language selection in [`resolver`].

pub mod loader;
pub mod resolver;

pub use loader::LocaleLoader;
pub use resolver::resolve_language;

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use unic_langid::LanguageIdentifier;

/// Hard fallback when the configured allow-list is empty.
pub const FALLBACK_LANGUAGE: &str = "en";

/// A validated language code in canonical BCP-47 form (`en`, `zh-CN`).
///
/// Construction goes through [`LanguageCode::parse`], so a value of this
/// type is always well-formed and canonically cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parses and canonicalizes a code. Blank or malformed input yields
    /// `None`; underscores are tolerated (`en_US` → `en-US`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().replace('_', "-");
        if normalized.is_empty() {
            return None;
        }
        normalized
            .parse::<LanguageIdentifier>()
            .ok()
            .map(|id| Self(id.to_string()))
    }

    /// The literal `"en"` fallback.
    #[must_use]
    pub fn fallback() -> Self {
        Self(FALLBACK_LANGUAGE.to_string())
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code reduced to its primary language subtag (`fr-CA` → `fr`).
    ///
    /// Canonical form keeps the language subtag lowercase, so the result
    /// is itself canonical.
    #[must_use]
    pub fn primary_subtag(&self) -> Self {
        match self.0.split('-').next() {
            Some(lang) if !lang.is_empty() => Self(lang.to_string()),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses a raw code list: canonicalize each entry, drop blanks and
/// malformed ones, deduplicate preserving first-seen order.
#[must_use]
pub fn parse_language_list<I, S>(entries: I) -> Vec<LanguageCode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<LanguageCode> = Vec::new();
    for entry in entries {
        if let Some(code) = LanguageCode::parse(entry.as_ref()) {
            if !out.contains(&code) {
                out.push(code);
            }
        }
    }
    out
}

/// One language-menu entry: canonical code plus its native-script label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub code: LanguageCode,
    /// Display label in the language's own script (`日本語`, not `Japanese`).
    pub label: &'static str,
}

/// Master list of languages the terminal can present, in menu order.
/// A session's catalog is the loaded subset of this list.
const MASTER_CATALOG: &[(&str, &str)] = &[
    ("en", "English"),
    ("fr", "Français"),
    ("de", "Deutsch"),
    ("es", "Español"),
    ("pt", "Português"),
    ("ru", "Русский"),
    ("tr", "Türkçe"),
    ("vi", "Tiếng Việt"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("zh-CN", "简体中文"),
    ("zh-TW", "繁體中文"),
];

/// Looks up the master-list entry for a code. Codes outside the master
/// list can still load resources; they just get no menu entry.
#[must_use]
pub fn catalog_entry(code: &LanguageCode) -> Option<CatalogEntry> {
    MASTER_CATALOG
        .iter()
        .find(|(known, _)| *known == code.as_str())
        .map(|(_, label)| CatalogEntry {
            code: code.clone(),
            label,
        })
}

/// A merged translation document: flat JSON object, key → message.
pub type ResourceDocument = Map<String, Value>;

/// Everything the locale provider needs to come up: one merged document
/// per successfully loaded language, the menu catalog, and the language
/// chosen for first render.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleBundle {
    /// Merged resources, one entry per language that loaded. Languages
    /// that failed are absent entirely, never present as an error value.
    pub resources: HashMap<LanguageCode, ResourceDocument>,
    /// Loaded languages that appear in the master list, in request order.
    pub catalog: Vec<CatalogEntry>,
    /// The language to activate on first render.
    pub default_language: LanguageCode,
}

impl LocaleBundle {
    /// Languages present in the bundle, in request order.
    #[must_use]
    pub fn loaded_codes(&self) -> Vec<&LanguageCode> {
        self.catalog.iter().map(|entry| &entry.code).collect()
    }
}

/// Lays an extension document over a base document.
///
/// Shallow and right-biased: a top-level key present in both takes the
/// extension's value wholesale; nested objects are not merged.
#[must_use]
pub fn merge_documents(base: ResourceDocument, extension: ResourceDocument) -> ResourceDocument {
    let mut merged = base;
    for (key, value) in extension {
        merged.insert(key, value);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ResourceDocument {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected JSON object"),
        }
    }

    #[test]
    fn parse_canonicalizes_case_and_separators() {
        assert_eq!(LanguageCode::parse("EN").unwrap().as_str(), "en");
        assert_eq!(LanguageCode::parse("en_us").unwrap().as_str(), "en-US");
        assert_eq!(LanguageCode::parse(" zh-cn ").unwrap().as_str(), "zh-CN");
    }

    #[test]
    fn parse_rejects_blank_and_malformed_input() {
        assert_eq!(LanguageCode::parse(""), None);
        assert_eq!(LanguageCode::parse("   "), None);
        assert_eq!(LanguageCode::parse("no!good"), None);
    }

    #[test]
    fn primary_subtag_drops_region() {
        let code = LanguageCode::parse("fr-CA").unwrap();
        assert_eq!(code.primary_subtag().as_str(), "fr");

        let bare = LanguageCode::parse("ja").unwrap();
        assert_eq!(bare.primary_subtag(), bare);
    }

    #[test]
    fn language_list_dedups_and_preserves_order() {
        let parsed = parse_language_list(["en", "", "fr", "EN", "bogus!", "ja"]);
        let as_strs: Vec<&str> = parsed.iter().map(LanguageCode::as_str).collect();
        assert_eq!(as_strs, vec!["en", "fr", "ja"]);
    }

    #[test]
    fn catalog_lookup_hits_master_list_only() {
        let ja = LanguageCode::parse("ja").unwrap();
        let entry = catalog_entry(&ja).unwrap();
        assert_eq!(entry.label, "日本語");

        let unknown = LanguageCode::parse("eo").unwrap();
        assert!(catalog_entry(&unknown).is_none());
    }

    #[test]
    fn merge_is_right_biased_on_key_collision() {
        let base = doc(json!({"x": "1", "y": "2"}));
        let extension = doc(json!({"y": "3"}));
        let merged = merge_documents(base, extension);
        assert_eq!(merged, doc(json!({"x": "1", "y": "3"})));
    }

    #[test]
    fn merge_with_empty_extension_is_identity() {
        let base = doc(json!({"title": "Markets"}));
        let merged = merge_documents(base.clone(), ResourceDocument::new());
        assert_eq!(merged, base);
    }

    #[test]
    fn merge_replaces_nested_objects_wholesale() {
        let base = doc(json!({"nav": {"home": "Home", "trade": "Trade"}}));
        let extension = doc(json!({"nav": {"home": "Start"}}));
        let merged = merge_documents(base, extension);
        // Shallow merge: the extension's nested object wins entirely.
        assert_eq!(merged, doc(json!({"nav": {"home": "Start"}})));
    }
}
