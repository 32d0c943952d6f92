// src/github/fixtures.rs
// =============================================================================
// Canned GitHub payloads and a fake JsonFetcher for tests.
//
// StubFetcher serves fixtures from a HashMap keyed by URL and records every
// URL it was asked for, so tests can check how many requests really went out.
// It can also fail the first N requests to simulate a flaky network.
// =============================================================================

use crate::utils::{JsonFetcher, TransportError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const ORG_URL: &str = "https://api.github.com/orgs/google";
pub const REPOS_URL: &str = "https://api.github.com/orgs/google/repos";

pub fn org_payload() -> Value {
    json!({
        "login": "google",
        "id": 1342004,
        "url": ORG_URL,
        "repos_url": REPOS_URL,
        "public_repos": 2,
        "type": "Organization"
    })
}

pub fn repos_payload() -> Value {
    json!([
        {
            "id": 7697149,
            "name": "episodes.dart",
            "full_name": "google/episodes.dart",
            "private": false,
            "license": {
                "key": "bsd-3-clause",
                "name": "BSD 3-Clause \"New\" or \"Revised\" License",
                "spdx_id": "BSD-3-Clause"
            }
        },
        {
            "id": 7776515,
            "name": "cpp-netlib",
            "full_name": "google/cpp-netlib",
            "private": false,
            "license": {
                "key": "bsl-1.0",
                "name": "Boost Software License 1.0",
                "spdx_id": "BSL-1.0"
            }
        }
    ])
}

#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
    failures_left: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    // Serves the google org and its two repositories
    pub fn google() -> Self {
        Self::new()
            .with_response(ORG_URL, org_payload())
            .with_response(REPOS_URL, repos_payload())
    }

    pub fn with_response(mut self, url: &str, payload: Value) -> Self {
        self.responses.insert(url.to_string(), payload);
        self
    }

    // The next `count` requests fail with HTTP 503
    pub fn failing_first(self, count: usize) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl JsonFetcher for StubFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());

        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: 503,
            });
        }

        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
