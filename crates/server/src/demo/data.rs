//! Fixed article records served by the demo server.

use serde::{Deserialize, Serialize};

/// Demo news record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub content: String,
}

impl NewsItem {
    fn new(id: u64, title: &str, category: &str, content: &str) -> Self {
        Self { id, title: title.into(), category: category.into(), content: content.into() }
    }

    /// Case-insensitive exact category match.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// The built-in demo records.
pub fn seed_items() -> Vec<NewsItem> {
    vec![
        NewsItem::new(
            1,
            "AI Breakthrough in 2025",
            "AI",
            "A new AI model surpasses human intelligence in various tasks...",
        ),
        NewsItem::new(
            2,
            "Latest JavaScript Framework",
            "Programming",
            "A new JS framework is revolutionizing web development...",
        ),
        NewsItem::new(
            3,
            "Cybersecurity Alert",
            "Cybersecurity",
            "A critical vulnerability was found in major software systems...",
        ),
        NewsItem::new(
            4,
            "Upcoming Smartphone Innovations",
            "Gadgets",
            "The next-gen smartphones will feature AI-powered assistants...",
        ),
    ]
}
