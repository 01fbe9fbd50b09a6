use super::types::CseResponse;
use anyhow::{Context, Result};
use claimlens_http::{Auth, HttpClient, HttpError, RequestOpts};
use std::borrow::Cow;
use std::time::Instant;

const CSE_PATH: &str = "customsearch/v1";

/// Minimal client for the Google Custom Search API.
#[derive(Clone)]
pub struct CseApi {
    http: HttpClient,
    api_key: String,
    engine_id: String,
}

impl CseApi {
    /// `endpoint` is the API origin (overridable for tests), normally
    /// `https://www.googleapis.com/`.
    pub fn new(api_key: String, engine_id: String, endpoint: &str) -> Result<Self, HttpError> {
        let http = HttpClient::new(endpoint)?;
        Ok(Self {
            http,
            api_key,
            engine_id,
        })
    }

    /// Fetch a single page of results. `start_index` is 1-based, as the API
    /// counts hits, not pages.
    pub async fn search_page(
        &self,
        query: &str,
        start_index: u32,
        num_results: u32,
    ) -> Result<CseResponse> {
        let query_snippet: String = query.chars().take(160).collect();
        let params: Vec<(&str, Cow<'_, str>)> = vec![
            ("cx", self.engine_id.as_str().into()),
            ("q", query.into()),
            ("num", num_results.to_string().into()),
            ("start", start_index.to_string().into()),
        ];

        let started = Instant::now();
        tracing::info!(
            target: "search.cse",
            query = %query_snippet,
            start_index,
            "cse.page.start"
        );

        let resp: Result<CseResponse, HttpError> = self
            .http
            .get_json(
                CSE_PATH,
                RequestOpts {
                    auth: Some(Auth::Query {
                        name: "key",
                        value: Cow::Borrowed(&self.api_key),
                    }),
                    query: Some(params),
                    retries: Some(0),
                    ..Default::default()
                },
            )
            .await;

        match resp {
            Ok(resp) => {
                tracing::info!(
                    target: "search.cse",
                    query = %query_snippet,
                    start_index,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    hit_count = resp.links().count(),
                    "cse.page.success"
                );
                Ok(resp)
            }
            Err(e) => {
                tracing::warn!(
                    target: "search.cse",
                    query = %query_snippet,
                    start_index,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "cse.page.error"
                );
                Err(anyhow::Error::new(e)).context("custom search request failed")
            }
        }
    }
}
