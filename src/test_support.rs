//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::{CatalogError, MovieCatalog, MovieSummary, SearchPage, SearchRequest};

/// A catalog for tests that don't need real API calls. Always returns an
/// empty first page.
pub struct NoopCatalog;

#[async_trait]
impl MovieCatalog for NoopCatalog {
    fn name(&self) -> &str {
        "noop"
    }

    async fn search_movies(&self, request: SearchRequest<'_>) -> Result<SearchPage, CatalogError> {
        Ok(SearchPage {
            page: request.page,
            results: Vec::new(),
            total_pages: 1,
            total_results: 0,
        })
    }
}

/// Builds a movie with predictable fields.
pub fn movie(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        release_date: Some("2001-09-14".to_string()),
        poster_path: Some(format!("/poster{id}.jpg")),
        backdrop_path: None,
        vote_average: 7.5,
        vote_count: 120,
        overview: format!("Overview of {title}."),
    }
}

/// Builds a search page with `count` movies.
pub fn search_page(page: u32, count: usize, total_pages: u32) -> SearchPage {
    let results: Vec<MovieSummary> = (0..count)
        .map(|i| {
            let id = u64::from(page) * 1000 + i as u64;
            movie(id, &format!("Movie {id}"))
        })
        .collect();
    SearchPage {
        page,
        total_results: total_pages * 20,
        results,
        total_pages,
    }
}

/// Creates a test App with a NoopCatalog.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopCatalog), "popular", Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_catalog_echoes_page() {
        let page = tokio_test::block_on(NoopCatalog.search_movies(SearchRequest {
            query: "anything",
            page: 3,
        }))
        .unwrap();
        assert_eq!(page.page, 3);
        assert!(page.is_empty());
    }

    #[test]
    fn test_search_page_builder() {
        let page = search_page(2, 3, 7);
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[0].id, 2000);
        assert_eq!(page.total_results, 140);
    }
}
