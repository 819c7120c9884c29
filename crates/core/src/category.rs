//! Category vocabulary.
//!
//! Site sections ("AI", "Programming", ...) do not exist in NewsAPI's fixed
//! category list, so every label is resolved through the single table in
//! [`UpstreamCategory::from_label`]. Both the client and the proxy go through it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories accepted by NewsAPI's `top-headlines` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamCategory {
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl UpstreamCategory {
    /// Resolve a site category label to the upstream vocabulary.
    ///
    /// Matching trims and ignores case. Unknown labels fall back to `Technology`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "all" | "general" => UpstreamCategory::General,
            "business" => UpstreamCategory::Business,
            "entertainment" => UpstreamCategory::Entertainment,
            "health" => UpstreamCategory::Health,
            "science" => UpstreamCategory::Science,
            "sports" => UpstreamCategory::Sports,
            "ai" | "ai & machine learning" | "programming" | "gadgets" | "security" | "cybersecurity"
            | "technology" => UpstreamCategory::Technology,
            other => {
                tracing::debug!("unmapped category label {:?}, using technology", other);
                UpstreamCategory::Technology
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamCategory::Business => "business",
            UpstreamCategory::Entertainment => "entertainment",
            UpstreamCategory::General => "general",
            UpstreamCategory::Health => "health",
            UpstreamCategory::Science => "science",
            UpstreamCategory::Sports => "sports",
            UpstreamCategory::Technology => "technology",
        }
    }
}

impl fmt::Display for UpstreamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
