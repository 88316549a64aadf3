//! This modules defines the common functionality for paging data.

use serde::Deserialize;

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of items per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a client may ask for. Larger requests are clamped.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// The paging parameters of a list request, as sent by the client.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// The 1-based page number.
    pub page: Option<u64>,
    /// The number of items per page.
    pub limit: Option<u64>,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The 1-based page number.
    pub page: u64,
    /// The number of items per page.
    pub limit: u64,
}

impl Page {
    /// Fill in defaults from `config` and check that `page` and `limit` are at least one.
    ///
    /// # Errors
    /// Returns [Error::Validation] if either value is zero.
    pub fn from_query(query: &PageQuery, config: &PaginationConfig) -> Result<Self, Error> {
        let page = query.page.unwrap_or(config.default_page);
        let limit = query.limit.unwrap_or(config.default_page_size);

        if page == 0 {
            return Err(Error::Validation("page must be at least 1".to_owned()));
        }

        if limit == 0 {
            return Err(Error::Validation("limit must be at least 1".to_owned()));
        }

        Ok(Self {
            page,
            limit: limit.min(config.max_page_size),
        })
    }

    /// The number of items to skip to reach this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// The number of pages needed to show `total` items, `limit` at a time.
pub fn page_count(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }

    total.div_ceil(limit)
}
