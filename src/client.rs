use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::UpstreamError,
    model::{RawSearchItem, UpstreamResult},
};

pub const DEFAULT_UPSTREAM: &str = "https://api.tvmaze.com";

#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, term: &str) -> Result<UpstreamResult, UpstreamError>;
}

#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http_client: reqwest::Client,
    search_url: String,
}

impl HttpSearchClient {
    pub fn new(upstream: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
            search_url: format!("{}/search/memes", upstream.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, term: &str) -> Result<UpstreamResult, UpstreamError> {
        log::debug!("GET {} q={term:?}", self.search_url);

        // reqwest percent-encodes the term here.
        let response = self
            .http_client
            .get(&self.search_url)
            .query(&[("q", term)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        parse_upstream_body(&response.bytes().await?)
    }
}

pub fn parse_upstream_body(body: &[u8]) -> Result<UpstreamResult, UpstreamError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(UpstreamResult::Absent);
    }

    match serde_json::from_slice::<Value>(body)? {
        Value::Null => Ok(UpstreamResult::Absent),
        Value::Array(entries) if entries.is_empty() => Ok(UpstreamResult::Empty),
        Value::Array(entries) => Ok(UpstreamResult::Items(
            entries
                .into_iter()
                .filter_map(|entry| {
                    serde_json::from_value::<RawSearchItem>(entry)
                        .inspect_err(|error| log::debug!("skipping search result: {error}"))
                        .ok()
                })
                .collect(),
        )),
        other => {
            log::warn!("expected a JSON array from the search provider, got: {other}");
            Ok(UpstreamResult::Absent)
        }
    }
}
