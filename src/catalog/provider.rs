use std::fmt;

use async_trait::async_trait;

use super::types::SearchPage;

/// Errors that can occur while querying the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Catalog misconfigured (missing access token, bad URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The catalog answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body was not the expected JSON shape.
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Config(msg) => write!(f, "config error: {msg}"),
            CatalogError::Network(msg) => write!(f, "network error: {msg}"),
            CatalogError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            CatalogError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Parameters for one search call.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    /// 1-based page index.
    pub page: u32,
}

#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Returns the name of the catalog backend.
    fn name(&self) -> &str;

    /// Fetches one page of movies matching the query.
    async fn search_movies(&self, request: SearchRequest<'_>) -> Result<SearchPage, CatalogError>;
}
