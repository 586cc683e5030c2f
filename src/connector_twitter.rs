//! Twitter search source.
//!
//! Runs one keyword search against the standard v1.1 search endpoint and
//! pages through the results until the configured number of tweets is
//! collected.
//!
//! # Environment Variables
//!
//! All four are required. A `.env` file in the working directory is read
//! first by the binary.
//! - `TWITTER_CONSUMER_KEY`
//! - `TWITTER_CONSUMER_SECRET`
//! - `TWITTER_ACCESS_TOKEN`
//! - `TWITTER_ACCESS_TOKEN_SECRET`
//!
//! # Authentication
//!
//! Requests are signed with
//! [OAuth 1.0a](https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature)
//! HMAC-SHA1 (`hmac` + `sha1` crates), signature base64-encoded.
//!
//! # Pagination
//!
//! Pages are requested with `count = min(page_size, remaining)`. After each
//! page, `max_id` is set to the smallest tweet id seen minus one. Paging
//! stops when enough tweets are collected, a page is empty, or `max_id`
//! would not move backwards.
//!
//! There is no retry or backoff: a transport error or non-2xx response
//! (including HTTP 429) fails the fetch.

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha1::Sha1;
use std::time::Duration;
use tweet_sentiment_core::RawText;

use crate::config::TwitterSourceConfig;
use crate::traits::Source;

type HmacSha1 = Hmac<Sha1>;

/// Path of the search endpoint, relative to `api_base`.
const SEARCH_PATH: &str = "/1.1/search/tweets.json";

// ============ Credentials ============

/// OAuth 1.0a user-context credentials.
#[derive(Clone)]
pub struct TwitterCredentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_token_secret: String,
}

impl std::fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

impl TwitterCredentials {
    /// Environment variable names, in the order the credentials are read.
    pub const ENV_VARS: [&'static str; 4] = [
        "TWITTER_CONSUMER_KEY",
        "TWITTER_CONSUMER_SECRET",
        "TWITTER_ACCESS_TOKEN",
        "TWITTER_ACCESS_TOKEN_SECRET",
    ];

    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    /// Load credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when any variable is unset or blank; the message names every
    /// missing variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Names of the credential variables that are unset or blank.
    pub fn missing_from_env() -> Vec<&'static str> {
        missing_vars(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let missing = missing_vars(&lookup);
        if !missing.is_empty() {
            bail!(
                "Missing Twitter API credentials: {} not set in environment",
                missing.join(", ")
            );
        }

        let get = |name: &str| lookup(name).unwrap_or_default().trim().to_string();
        Ok(Self::new(
            get(Self::ENV_VARS[0]),
            get(Self::ENV_VARS[1]),
            get(Self::ENV_VARS[2]),
            get(Self::ENV_VARS[3]),
        ))
    }
}

fn missing_vars(lookup: impl Fn(&str) -> Option<String>) -> Vec<&'static str> {
    TwitterCredentials::ENV_VARS
        .iter()
        .copied()
        .filter(|name| {
            lookup(name)
                .map(|v| v.trim().is_empty())
                .unwrap_or(true)
        })
        .collect()
}

// ============ Source trait implementation ============

/// A keyword search implementing [`Source`].
pub struct TwitterSource {
    topic: String,
    config: TwitterSourceConfig,
    credentials: TwitterCredentials,
}

impl TwitterSource {
    pub fn new(
        topic: impl Into<String>,
        config: TwitterSourceConfig,
        credentials: TwitterCredentials,
    ) -> Self {
        Self {
            topic: topic.into(),
            config,
            credentials,
        }
    }
}

impl Source for TwitterSource {
    fn name(&self) -> &str {
        &self.topic
    }

    fn description(&self) -> &str {
        "Search recent tweets by keyword"
    }

    fn source_type(&self) -> &str {
        "twitter"
    }

    fn fetch(&self) -> Result<Vec<RawText>> {
        search_tweets(&self.topic, &self.config, &self.credentials)
    }
}

// ============ Search ============

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    statuses: Vec<Status>,
}

#[derive(Debug, Deserialize)]
struct Status {
    id: u64,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    full_text: Option<String>,
}

impl Status {
    fn into_text(self) -> String {
        self.full_text.or(self.text).unwrap_or_default()
    }
}

/// Fetch up to `config.count` tweets matching `topic`.
///
/// # Errors
///
/// Returns an error on any transport failure, non-success HTTP status, or
/// unparseable response body. Nothing is retried.
pub fn search_tweets(
    topic: &str,
    config: &TwitterSourceConfig,
    creds: &TwitterCredentials,
) -> Result<Vec<RawText>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let url = format!("{}{}", config.api_base.trim_end_matches('/'), SEARCH_PATH);

    tracing::info!("Fetching {} tweets about '{}'", config.count, topic);

    let mut texts: Vec<RawText> = Vec::new();
    let mut max_id: Option<u64> = None;
    let mut page = 0usize;

    while texts.len() < config.count {
        page += 1;
        let page_size = (config.count - texts.len()).min(config.page_size);

        let mut params = vec![
            ("q".to_string(), topic.to_string()),
            ("lang".to_string(), config.lang.clone()),
            ("count".to_string(), page_size.to_string()),
            ("tweet_mode".to_string(), "extended".to_string()),
        ];
        if let Some(id) = max_id {
            params.push(("max_id".to_string(), id.to_string()));
        }

        let statuses = fetch_page(&client, &url, &params, creds)?;
        if statuses.is_empty() {
            tracing::debug!(page, "search returned an empty page");
            break;
        }

        let next = next_max_id(&statuses);
        let fetched = statuses.len();
        for status in statuses {
            if texts.len() >= config.count {
                break;
            }
            texts.push(RawText::new(texts.len(), status.into_text()));
        }
        tracing::debug!(page, fetched, total = texts.len(), "fetched search page");

        match next {
            Some(id) if max_id.map_or(true, |current| id < current) => max_id = Some(id),
            _ => break,
        }
    }

    tracing::info!("Fetched {} tweets about '{}'", texts.len(), topic);
    Ok(texts)
}

/// Request one page and parse its statuses.
fn fetch_page(
    client: &reqwest::blocking::Client,
    url: &str,
    params: &[(String, String)],
    creds: &TwitterCredentials,
) -> Result<Vec<Status>> {
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let timestamp = chrono::Utc::now().timestamp();
    let authorization = authorization_header("GET", url, params, creds, &nonce, timestamp);

    let query: String = params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let full_url = format!("{}?{}", url, query);

    let resp = client
        .get(&full_url)
        .header("Authorization", authorization)
        .send()
        .map_err(|e| anyhow::anyhow!("Twitter search request to {} failed: {}", url, e))?;

    let status = resp.status();
    if !status.is_success() {
        let reset = resp
            .headers()
            .get("x-rate-limit-reset")
            .and_then(|v| v.to_str().ok())
            .map(|v| format!(" (rate limit resets at {})", v))
            .unwrap_or_default();
        let body = resp.text().unwrap_or_default();
        bail!(
            "Twitter search failed (HTTP {}){}: {}",
            status,
            reset,
            body.chars().take(500).collect::<String>()
        );
    }

    let body = resp.text().context("Failed to read Twitter search response")?;
    let parsed: SearchResponse =
        serde_json::from_str(&body).context("Failed to parse Twitter search response")?;
    Ok(parsed.statuses)
}

/// `max_id` for the page after `statuses`: the smallest id minus one.
fn next_max_id(statuses: &[Status]) -> Option<u64> {
    statuses
        .iter()
        .map(|s| s.id)
        .min()
        .and_then(|id| id.checked_sub(1))
}

// ============ OAuth 1.0a Helpers ============

/// The `oauth_*` protocol parameters, without the signature.
fn oauth_params(creds: &TwitterCredentials, nonce: &str, timestamp: i64) -> Vec<(String, String)> {
    vec![
        ("oauth_consumer_key".to_string(), creds.consumer_key.clone()),
        ("oauth_nonce".to_string(), nonce.to_string()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_token".to_string(), creds.access_token.clone()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ]
}

/// Build the signature base string.
///
/// ```text
/// METHOD&enc(url)&enc(k1=v1&k2=v2...)
/// ```
///
/// Request and protocol parameters are percent-encoded, then sorted by key
/// and value.
fn signature_base_string(
    method: &str,
    url: &str,
    request_params: &[(String, String)],
    oauth: &[(String, String)],
) -> String {
    let mut encoded: Vec<(String, String)> = request_params
        .iter()
        .chain(oauth.iter())
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&parameter_string)
    )
}

/// Base64 HMAC-SHA1 of the base string, keyed by both secrets.
fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base_string.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Build the `Authorization: OAuth ...` header value for one request.
fn authorization_header(
    method: &str,
    url: &str,
    request_params: &[(String, String)],
    creds: &TwitterCredentials,
    nonce: &str,
    timestamp: i64,
) -> String {
    let mut oauth = oauth_params(creds, nonce, timestamp);
    let base = signature_base_string(method, url, request_params, &oauth);
    let signature = sign(&base, &creds.consumer_secret, &creds.access_token_secret);
    oauth.push(("oauth_signature".to_string(), signature));
    oauth.sort();

    let fields = oauth
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {}", fields)
}

/// Percent-encode per RFC 3986.
///
/// Leaves only the unreserved characters `A-Z a-z 0-9 - _ . ~` as-is.
fn percent_encode(s: &str) -> String {
    let mut result = String::new();
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    result
}
