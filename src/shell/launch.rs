// SPDX-License-Identifier: MPL-2.0
//! Activation request parsing.
//!
//! The shell can be activated with a URL-style request string (a deep
//! link or a relaunch handoff). Only the query parameters matter here;
//! the parser is tolerant because activation strings arrive from outside
//! the process and cannot be trusted to be well-formed.

/// Ordered query parameters from an activation URL.
///
/// Duplicate keys are kept in arrival order and lookups see the first
/// occurrence, matching common query-string semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchContext {
    params: Vec<(String, String)>,
}

impl LaunchContext {
    /// Parses the query portion of an activation URL.
    ///
    /// Everything before the first `?` and any `#fragment` tail are
    /// ignored; an absent query yields an empty context.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let without_fragment = url.split('#').next().unwrap_or(url);
        match without_fragment.split_once('?') {
            Some((_, query)) => Self::from_query(query),
            None => Self::default(),
        }
    }

    /// Parses a bare query string (`lang=ja&ref=banner`).
    ///
    /// Empty segments are skipped and a segment without `=` becomes a
    /// key with an empty value. A leading `?` is tolerated.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (segment.to_string(), String::new()),
            })
            .collect();
        Self { params }
    }

    /// The value of the first occurrence of `key`, if present.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Removes every occurrence of `key`, returning the first value.
    ///
    /// Used to consume one-shot parameters so they do not leak into a
    /// relaunch handoff.
    pub fn remove_param(&mut self, key: &str) -> Option<String> {
        let first = self
            .params
            .iter()
            .position(|(name, _)| name == key)
            .map(|index| self.params.remove(index).1);
        self.params.retain(|(name, _)| name != key);
        first
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Re-serializes the remaining parameters as a query string, in
    /// their original order.
    #[must_use]
    pub fn to_query(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{name}={value}")
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
