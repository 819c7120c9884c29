//! Core types and shared functionality for techtrends.
//!
//! This crate provides:
//! - Article formatting from raw NewsAPI payloads
//! - The in-memory TTL request cache
//! - Category and endpoint vocabularies shared by client and proxy
//! - Unified error types
//! - Configuration structures

pub mod article;
pub mod cache;
pub mod category;
pub mod config;
pub mod endpoint;
pub mod error;

pub use article::{FormattedArticle, RawArticle, RawSource, format_article};
pub use cache::{RequestCache, cache_key};
pub use category::UpstreamCategory;
pub use config::{AppConfig, ConfigError, Environment};
pub use endpoint::{Endpoint, NewsParams};
pub use error::Error;
