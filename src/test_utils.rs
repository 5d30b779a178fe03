// SPDX-License-Identifier: MPL-2.0
//! Shared test doubles.

use crate::locale::loader::{FetchError, ResourceFetcher};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`ResourceFetcher`]: a URL table plus a log of every request
/// made. Unregistered URLs answer 404, which doubles as "no overlay".
pub struct StaticFetcher {
    responses: HashMap<String, Result<Value, FetchError>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, url: &str, err: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(err));
        self
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|seen| seen.as_str() == url)
            .count()
    }
}

impl ResourceFetcher for StaticFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(result) => result.clone(),
            None => Err(FetchError::Status(404)),
        }
    }
}
