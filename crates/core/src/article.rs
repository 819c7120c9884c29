//! Article formatting.
//!
//! Turns a raw NewsAPI article into the display shape used by the renderer.
//!
//! ### Fallbacks
//!
//! Every raw field is optional; empty strings count as missing.
//!
//! - **id**: URL with non-alphanumeric characters replaced by `-`, else `article-<unix ms>`
//! - **excerpt**: `"No description available"`
//! - **author**: `"Unknown Author"`
//! - **image**: generated Unsplash URL keyed by category slug
//! - **date**: long US date (`January 5, 2025`), else `"Date not available"`
//! - **readTime**: `ceil(words / 200)` minutes, `"1 min"` for empty content

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Words per minute used for read time estimates.
const WORDS_PER_MINUTE: usize = 200;

const NO_TITLE: &str = "No title available";
const NO_DESCRIPTION: &str = "No description available";
const NO_DATE: &str = "Date not available";
const UNKNOWN_AUTHOR: &str = "Unknown Author";
const UNKNOWN_SOURCE: &str = "Unknown Source";
const DEFAULT_CATEGORY: &str = "General";

/// Article as returned by NewsAPI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Publisher reference embedded in a raw article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Display-ready article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedArticle {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub date: String,
    pub author: String,
    pub image: String,
    pub source: String,
    pub url: String,
    pub read_time: String,
}

/// Format a raw article for display under the given category label.
pub fn format_article(raw: &RawArticle, category: &str) -> FormattedArticle {
    format_article_at(raw, category, Utc::now())
}

/// Same as [`format_article`] with an explicit clock for the placeholder id.
pub fn format_article_at(raw: &RawArticle, category: &str, now: DateTime<Utc>) -> FormattedArticle {
    let category = if category.trim().is_empty() { DEFAULT_CATEGORY } else { category };
    let url = present(&raw.url);

    FormattedArticle {
        id: url
            .map(sanitize_id)
            .unwrap_or_else(|| format!("article-{}", now.timestamp_millis())),
        title: present(&raw.title).unwrap_or(NO_TITLE).to_string(),
        excerpt: present(&raw.description).unwrap_or(NO_DESCRIPTION).to_string(),
        content: present(&raw.content).unwrap_or_default().to_string(),
        category: category.to_string(),
        date: present(&raw.published_at)
            .and_then(format_date)
            .unwrap_or_else(|| NO_DATE.to_string()),
        author: present(&raw.author).unwrap_or(UNKNOWN_AUTHOR).to_string(),
        image: present(&raw.url_to_image)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_image(category)),
        source: raw
            .source
            .as_ref()
            .and_then(|s| present(&s.name))
            .unwrap_or(UNKNOWN_SOURCE)
            .to_string(),
        url: url.unwrap_or("#").to_string(),
        read_time: read_time(present(&raw.content)),
    }
}

/// Estimate reading time for article content.
pub fn read_time(content: Option<&str>) -> String {
    let Some(content) = content.filter(|c| !c.is_empty()) else {
        return "1 min".to_string();
    };

    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

/// Placeholder image URL for articles without one.
pub fn fallback_image(category: &str) -> String {
    let slug = category.trim().to_lowercase().replace(' ', "-");
    let slug = if slug.is_empty() { "technology".to_string() } else { slug };
    format!("https://source.unsplash.com/random/600x400/?{slug},tech")
}

fn sanitize_id(url: &str) -> String {
    url.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Render an RFC 3339 timestamp as `January 5, 2025`.
fn format_date(published_at: &str) -> Option<String> {
    match DateTime::parse_from_rfc3339(published_at) {
        Ok(dt) => Some(dt.with_timezone(&Utc).format("%B %-d, %Y").to_string()),
        Err(e) => {
            tracing::debug!("unparseable publishedAt {:?}: {}", published_at, e);
            None
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
