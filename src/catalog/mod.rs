pub mod provider;
pub mod tmdb;
pub mod types;

pub use provider::{CatalogError, MovieCatalog, SearchRequest};
pub use tmdb::TmdbCatalog;
pub use types::{MovieSummary, SearchPage, image_url};
