// src/github/client.rs
// =============================================================================
// A client for one GitHub organization.
//
// Flow for public_repos():
//   org()           -> GET https://api.github.com/orgs/<name>   (cached)
//   repos_url()     -> org()["repos_url"]
//   repos_payload() -> GET <repos_url>                          (cached)
//   public_repos()  -> names from repos_payload(), optionally only those
//                      whose license.key matches
//
// Both GETs happen at most once per client. Calling public_repos() with
// three different licenses still costs two requests in total.
//
// Rust concepts:
// - Generic struct with a default type parameter (F = HttpFetcher)
// - Borrowing from &self: org() hands out &Value that lives in the cache
// - thiserror: one error enum for everything the client can hit
// =============================================================================

use crate::utils::{
    access_nested_map, HttpFetcher, JsonFetcher, KeyError, Memo, TransportError,
    DEFAULT_USER_AGENT,
};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const ORG_PLACEHOLDER: &str = "{org}";
pub const DEFAULT_ORG_URL_TEMPLATE: &str = "https://api.github.com/orgs/{org}";

// Stands in for {org} while the template is parsed; braces would be encoded
const ORG_SENTINEL: &str = "__org_client_org__";

// Everything that can go wrong while talking to an organization
#[derive(Debug, Error)]
pub enum ClientError {
    /// The fetch itself failed (network, status, bad JSON)
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A field we rely on is missing from a payload
    #[error(transparent)]
    MissingKey(#[from] KeyError),

    /// A field is present but has the wrong JSON type
    #[error("expected {what} to be {expected}")]
    UnexpectedShape { what: String, expected: &'static str },

    /// The organization URL built from the template doesn't parse
    #[error("invalid organization URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL template has no {org} placeholder in its path
    #[error("URL template {0:?} does not contain {{org}} in its path")]
    InvalidTemplate(String),
}

// Settings shared by every client built from them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Organization metadata URL; `{org}` is replaced with the name
    pub org_url_template: String,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(
        org_url_template: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let org_url_template = org_url_template.into();
        if !org_url_template.contains(ORG_PLACEHOLDER) {
            return Err(ClientError::InvalidTemplate(org_url_template));
        }

        Ok(Self {
            org_url_template,
            user_agent: user_agent.into(),
        })
    }

    // Builds the metadata URL for `org`.
    //
    // The placeholder must sit in the URL path. The name is percent-encoded
    // as one path segment, so a "/" "?" or "#" inside it can't point the
    // request at another resource or into the query string.
    pub fn org_url(&self, org: &str) -> Result<String, ClientError> {
        let template = self.org_url_template.replace(ORG_PLACEHOLDER, ORG_SENTINEL);
        let mut url = Url::parse(&template).map_err(|source| ClientError::InvalidUrl {
            url: self.org_url_template.clone(),
            source,
        })?;

        if !url.path().contains(ORG_SENTINEL) {
            return Err(ClientError::InvalidTemplate(self.org_url_template.clone()));
        }

        // Let the url crate encode the name as a single path segment
        let mut scratch = url.clone();
        match scratch.path_segments_mut() {
            Ok(mut path) => {
                path.clear().push(org);
            }
            Err(()) => return Err(ClientError::InvalidTemplate(self.org_url_template.clone())),
        }
        let encoded_org = scratch.path().trim_start_matches('/').to_string();

        let path = url.path().replace(ORG_SENTINEL, &encoded_org);
        url.set_path(&path);

        Ok(url.to_string())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            org_url_template: DEFAULT_ORG_URL_TEMPLATE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// Client for one organization. Each instance owns its own cache slots.
pub struct GithubOrgClient<F = HttpFetcher> {
    org_name: String,
    config: ClientConfig,
    fetcher: F,
    org: Memo<Value>,
    repos_payload: Memo<Vec<Value>>,
}

impl GithubOrgClient<HttpFetcher> {
    // A client for `org_name` that talks to the real GitHub API.
    // Nothing is fetched until an accessor is called.
    pub fn new(org_name: impl Into<String>) -> Self {
        Self::from_config(org_name, ClientConfig::default())
    }

    pub fn from_config(org_name: impl Into<String>, config: ClientConfig) -> Self {
        let fetcher = HttpFetcher::with_user_agent(config.user_agent.clone());
        Self::with_config(org_name, config, fetcher)
    }
}

impl<F: JsonFetcher> GithubOrgClient<F> {
    pub fn with_fetcher(org_name: impl Into<String>, fetcher: F) -> Self {
        Self::with_config(org_name, ClientConfig::default(), fetcher)
    }

    pub fn with_config(org_name: impl Into<String>, config: ClientConfig, fetcher: F) -> Self {
        Self {
            org_name: org_name.into(),
            config,
            fetcher,
            org: Memo::new("org"),
            repos_payload: Memo::new("repos_payload"),
        }
    }

    pub fn org_name(&self) -> &str {
        &self.org_name
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    // Organization metadata. Fetched on first use, then cached.
    pub async fn org(&self) -> Result<&Value, ClientError> {
        self.org.get_or_try_init(|| self.fetch_org()).await
    }

    // The `repos_url` field of the organization metadata.
    //
    // Not cached on its own; it reads from the cached `org()`.
    pub async fn repos_url(&self) -> Result<String, ClientError> {
        let org = self.org().await?;
        let repos_url = access_nested_map(org, ["repos_url"])?;

        repos_url
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ClientError::UnexpectedShape {
                what: "repos_url".to_string(),
                expected: "a string",
            })
    }

    // Every repository record at `repos_url()`. Fetched on first use, then cached.
    pub async fn repos_payload(&self) -> Result<&[Value], ClientError> {
        self.repos_payload
            .get_or_try_init(|| self.fetch_repos())
            .await
            .map(Vec::as_slice)
    }

    // Repository names in payload order. With `license`, only repositories
    // whose license.key equals it exactly are kept.
    pub async fn public_repos(&self, license: Option<&str>) -> Result<Vec<String>, ClientError> {
        let repos = self.repos_payload().await?;

        let mut names = Vec::new();
        for repo in repos {
            if let Some(license_key) = license {
                if !has_license(repo, license_key) {
                    continue;
                }
            }
            names.push(repo_name(repo)?);
        }

        debug!(
            org = %self.org_name,
            license = license.unwrap_or("<any>"),
            count = names.len(),
            "filtered repositories"
        );
        Ok(names)
    }

    async fn fetch_org(&self) -> Result<Value, ClientError> {
        let url = self.config.org_url(&self.org_name)?;
        Ok(self.fetcher.fetch_json(&url).await?)
    }

    async fn fetch_repos(&self) -> Result<Vec<Value>, ClientError> {
        let url = self.repos_url().await?;

        match self.fetcher.fetch_json(&url).await? {
            Value::Array(repos) => Ok(repos),
            _ => Err(ClientError::UnexpectedShape {
                what: url,
                expected: "a JSON array of repositories",
            }),
        }
    }
}

// True when `repo["license"]["key"]` equals `license_key` exactly.
//
// A repository without a license (no "license" field, or "license": null)
// simply doesn't match; that's an ordinary state, not an error.
pub fn has_license(repo: &Value, license_key: &str) -> bool {
    match access_nested_map(repo, ["license", "key"]) {
        Ok(key) => key.as_str() == Some(license_key),
        Err(KeyError { .. }) => false,
    }
}

fn repo_name(repo: &Value) -> Result<String, ClientError> {
    access_nested_map(repo, ["name"])?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ClientError::UnexpectedShape {
            what: "repository name".to_string(),
            expected: "a string",
        })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is has_license a free function?
//    - It doesn't need a client, just a repository record
//    - GithubOrgClient::has_license would force callers to name a fetcher type
//
// 2. Why does has_license match on KeyError instead of using `?`?
//    - "No license" is a normal repository, not a failure
//    - KeyError is the only error access_nested_map can return, so nothing
//      else is being hidden
//
// 3. Why does org() return &Value and not Value?
//    - The value lives inside the Memo for as long as the client does
//    - Handing out a reference avoids cloning the whole payload per call
// -----------------------------------------------------------------------------
