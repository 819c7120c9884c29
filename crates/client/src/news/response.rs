//! NewsAPI response types.

use serde::{Deserialize, Serialize};
use techtrends_core::{FormattedArticle, RawArticle, format_article};

/// Body returned by NewsAPI (and relayed verbatim by the proxy).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewsApiResponse {
    /// NewsAPI signals some failures with `status: "error"` in the body.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }

    /// Format every article under the given category label.
    pub fn formatted(&self, label: &str) -> Vec<FormattedArticle> {
        self.articles.iter().map(|a| format_article(a, label)).collect()
    }
}

/// Error body from NewsAPI (`message`) or the proxy (`error`).
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The most specific message available, if any.
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}
