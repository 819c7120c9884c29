//! Article queries and their validation.

use serde::Serialize;
use techtrends_core::{Endpoint, NewsParams, UpstreamCategory};

use crate::news::ClientError;

/// Minimum trimmed length of a search query.
pub const MIN_QUERY_CHARS: usize = 3;

pub const DEFAULT_FEATURED_LIMIT: u32 = 3;
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;

/// A resolved article query: where it goes, with which parameters, and the
/// category label the formatted articles will carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub endpoint: Endpoint,
    pub params: NewsParams,
    pub label: String,
}

/// Body sent to the proxy's `/api/proxy` route.
#[derive(Debug, Serialize)]
pub struct ProxyRequest<'a> {
    pub endpoint: Endpoint,
    pub params: &'a NewsParams,
}

impl ArticleQuery {
    /// Top technology headlines for the landing page.
    pub fn featured(limit: u32) -> Self {
        Self {
            endpoint: Endpoint::TopHeadlines,
            params: NewsParams::new()
                .with("category", UpstreamCategory::Technology)
                .with("pageSize", limit)
                .with("country", "us"),
            label: "Featured".into(),
        }
    }

    /// Headlines for one site category, resolved through the shared category table.
    pub fn by_category(category: &str, page: u32, per_page: u32) -> Self {
        Self {
            endpoint: Endpoint::TopHeadlines,
            params: NewsParams::new()
                .with("category", UpstreamCategory::from_label(category))
                .with("page", page)
                .with("pageSize", per_page)
                .with("country", "us"),
            label: category.to_string(),
        }
    }

    /// Full-text search, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` if the trimmed query is shorter than
    /// three characters.
    pub fn search(query: &str, page: u32, per_page: u32) -> Result<Self, ClientError> {
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            return Err(ClientError::Validation(format!(
                "Search query must be at least {MIN_QUERY_CHARS} characters"
            )));
        }

        Ok(Self {
            endpoint: Endpoint::Everything,
            params: NewsParams::new()
                .with("q", query)
                .with("page", page)
                .with("pageSize", per_page)
                .with("sortBy", "publishedAt")
                .with("language", "en"),
            label: "Search".into(),
        })
    }
}
