//! TMDB catalog implementation.
//!
//! Talks to `GET /search/movie` of the TMDB v3 API with a bearer access
//! token (the "API Read Access Token" from the TMDB account settings).

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::catalog::{CatalogError, MovieCatalog, SearchPage, SearchRequest};

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB search client.
pub struct TmdbCatalog {
    access_token: String,
    base_url: String,
    language: Option<String>,
    client: reqwest::Client,
}

impl TmdbCatalog {
    /// Creates a new TMDB client.
    ///
    /// # Arguments
    /// * `access_token` - TMDB bearer token
    /// * `base_url` - Optional custom base URL (defaults to the public v3 API)
    /// * `language` - Optional response language, e.g. `en-US`
    pub fn new(access_token: String, base_url: Option<String>, language: Option<String>) -> Self {
        Self {
            access_token,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
            language,
            client: reqwest::Client::new(),
        }
    }

    fn query_params(&self, request: &SearchRequest<'_>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", request.query.to_string()),
            ("page", request.page.to_string()),
        ];
        if let Some(language) = &self.language {
            params.push(("language", language.clone()));
        }
        params
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn search_movies(&self, request: SearchRequest<'_>) -> Result<SearchPage, CatalogError> {
        if self.access_token.trim().is_empty() {
            return Err(CatalogError::Config("TMDB access token is empty".to_string()));
        }

        info!(
            "TMDB search request: query={:?}, page={}",
            request.query, request.page
        );

        let response = self
            .client
            .get(format!("{}/search/movie", self.base_url))
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Accept", "application/json")
            .query(&self.query_params(&request))
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        debug!("TMDB response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("TMDB API error: {} - {}", status, err_body);
            return Err(CatalogError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        let page: SearchPage = serde_json::from_str(&body).map_err(|e| {
            warn!("TMDB response did not parse: {}", e);
            CatalogError::Parse(e.to_string())
        })?;

        info!(
            "TMDB search complete: page {}/{}, {} results on page, {} total",
            page.page,
            page.total_pages,
            page.results.len(),
            page.total_results
        );
        Ok(page)
    }
}
