//! Client code for techtrends.
//!
//! This crate provides the news API client (direct or via the proxy) and the
//! HTML renderer that consumes its formatted articles.

pub mod news;
pub mod render;

pub use news::{
    ArticleQuery, ClientError, DEFAULT_FEATURED_LIMIT, DEFAULT_PAGE, DEFAULT_PER_PAGE, NewsApiResponse, NewsClient,
    NewsClientConfig, Transport,
};
pub use render::{escape_html, render_article_list, render_error, render_featured, render_page, render_search_results};
