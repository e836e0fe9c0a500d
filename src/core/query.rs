//! # Query & Pagination State
//!
//! Owns the current search term and page. Both live in one struct and are
//! only changed through `submit` and `set_page`, so a new search term and
//! its page reset are always observed together.

use std::fmt;
use std::num::NonZeroU32;

/// Query the app starts with before the user searches for anything.
pub const DEFAULT_QUERY: &str = "popular";

/// Rejected search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Input was empty or whitespace-only.
    Empty,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Empty => write!(f, "Please enter your search query."),
        }
    }
}

impl std::error::Error for QueryError {}

/// A trimmed, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 1-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    /// Returns `None` for 0.
    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    /// Converts the 0-based index reported by the pagination control.
    pub fn from_selected(selected: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(selected))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// 0-based index for the pagination control.
    pub fn selected(self) -> u32 {
        self.0.get() - 1
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cache key for one fetch: a query and a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub query: SearchQuery,
    pub page: PageNumber,
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, page {})", self.query.as_str(), self.page)
    }
}

/// Result of a valid submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Query replaced and page reset to 1.
    Changed,
    /// Same query as before; nothing touched.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    query: Option<SearchQuery>,
    page: PageNumber,
}

impl QueryState {
    /// `initial` is trimmed; an empty value leaves the state without a query,
    /// which disables fetching until the user submits one.
    pub fn new(initial: &str) -> Self {
        Self {
            query: SearchQuery::parse(initial).ok(),
            page: PageNumber::FIRST,
        }
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Accepts raw user input. Whitespace-only input is rejected without
    /// mutating anything.
    pub fn submit(&mut self, raw: &str) -> Result<SubmitOutcome, QueryError> {
        let query = SearchQuery::parse(raw)?;
        if self.query.as_ref() == Some(&query) {
            return Ok(SubmitOutcome::Unchanged);
        }
        self.query = Some(query);
        self.page = PageNumber::FIRST;
        Ok(SubmitOutcome::Changed)
    }

    /// Sets the page directly. Returns whether it changed.
    pub fn set_page(&mut self, page: PageNumber) -> bool {
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// `None` while no query is set.
    pub fn fetch_key(&self) -> Option<FetchKey> {
        self.query.as_ref().map(|query| FetchKey {
            query: query.clone(),
            page: self.page,
        })
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY)
    }
}
