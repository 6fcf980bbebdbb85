use crate::types::SEARCH_FILTER_KEY;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pagination, search, sort and filter parameters for listing scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,

    /// Free-text search, sent as `filter[search]`
    #[serde(default)]
    pub query: String,

    /// Sort expression, e.g. `-inserted_at`
    #[serde(default)]
    pub sort: String,

    /// Extra filters keyed by their literal query parameter name,
    /// e.g. `filter[provider_type]`.
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

fn default_page() -> u64 {
    1
}

impl Default for ScanQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            query: String::new(),
            sort: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl ScanQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Parse a raw page parameter as it arrives from a URL or form.
    ///
    /// Surrounding whitespace is ignored. Anything that is not an integer
    /// between 1 and `u64::MAX` is rejected.
    pub fn parse_page(raw: &str) -> Result<u64, ValidationError> {
        match raw.trim().parse::<u64>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(ValidationError::InvalidPage(raw.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page < 1 {
            return Err(ValidationError::InvalidPage(self.page.to_string()));
        }
        Ok(())
    }

    /// Query parameters in the order the backend receives them.
    ///
    /// `filter[search]` inside `filters` is skipped; the search term only
    /// comes from `query`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("page[number]".to_string(), self.page.to_string())];

        if !self.query.is_empty() {
            pairs.push((SEARCH_FILTER_KEY.to_string(), self.query.clone()));
        }
        if !self.sort.is_empty() {
            pairs.push(("sort".to_string(), self.sort.clone()));
        }

        pairs.extend(
            self.filters
                .iter()
                .filter(|(key, _)| key.as_str() != SEARCH_FILTER_KEY)
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        pairs
    }
}
