use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Base URL for TMDB image assets. Sizes such as `w500` or `original` are
/// appended before the file path.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// A single movie as returned by the catalog's search endpoint.
///
/// Only the fields the UI consumes are modeled; everything else in the
/// payload is ignored during deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
}

impl MovieSummary {
    /// Parsed release date. TMDB sends `""` or omits the field for unreleased titles.
    pub fn release(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release().map(|d| d.year())
    }

    /// Human-readable release date, e.g. "Mar 31, 1999".
    pub fn release_label(&self) -> String {
        match self.release() {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => "Unknown".to_string(),
        }
    }

    /// Rating formatted the way the grid and overlay show it, e.g. "8.2/10".
    pub fn rating_label(&self) -> String {
        if self.vote_count == 0 && self.vote_average == 0.0 {
            return "Not rated".to_string();
        }
        format!("{:.1}/10", self.vote_average)
    }
}

/// One page of search results.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub page: u32,
    pub results: Vec<MovieSummary>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl SearchPage {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Builds an absolute image URL from a catalog-relative path like `/abc.jpg`.
pub fn image_url(image_base: &str, size: &str, path: &str) -> String {
    format!(
        "{}/{}/{}",
        image_base.trim_end_matches('/'),
        size,
        path.trim_start_matches('/')
    )
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_json(release: &str) -> String {
        format!(
            r#"{{
                "id": 603,
                "title": "The Matrix",
                "release_date": {release},
                "poster_path": "/p.jpg",
                "backdrop_path": null,
                "vote_average": 8.2,
                "vote_count": 25000,
                "overview": "A hacker learns the truth.",
                "popularity": 80.1,
                "adult": false
            }}"#
        )
    }

    #[test]
    fn test_movie_ignores_unknown_fields() {
        let movie: MovieSummary = serde_json::from_str(&movie_json("\"1999-03-31\"")).unwrap();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.poster_path.as_deref(), Some("/p.jpg"));
        assert_eq!(movie.backdrop_path, None);
        assert_eq!(movie.release_year(), Some(1999));
        assert_eq!(movie.release_label(), "Mar 31, 1999");
        assert_eq!(movie.rating_label(), "8.2/10");
    }

    #[test]
    fn test_empty_release_date_is_none() {
        let movie: MovieSummary = serde_json::from_str(&movie_json("\"\"")).unwrap();
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.release_year(), None);
        assert_eq!(movie.release_label(), "Unknown");
    }

    #[test]
    fn test_null_overview_defaults_to_empty() {
        let json = r#"{"id": 1, "title": "Untitled", "overview": null}"#;
        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert!(movie.overview.is_empty());
        assert_eq!(movie.rating_label(), "Not rated");
    }

    #[test]
    fn test_search_page_parses() {
        let json = r#"{"page": 1, "results": [], "total_pages": 1, "total_results": 0}"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_image_url_joins_without_double_slashes() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/", "w500", "/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }
}
