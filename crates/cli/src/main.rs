//! `techtrends` command-line client.
//!
//! Fetches featured, category or search results through the news client and
//! prints them as JSON or as an HTML page. Failures are reported on stderr
//! (and as an error banner in HTML mode) with a non-zero exit code.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use techtrends_client::{
    ClientError, DEFAULT_FEATURED_LIMIT, DEFAULT_PAGE, DEFAULT_PER_PAGE, NewsClient, NewsClientConfig, render_article_list,
    render_error, render_featured, render_page, render_search_results,
};
use techtrends_core::{AppConfig, FormattedArticle, RequestCache};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "techtrends")]
#[command(about = "Fetch technology news from NewsAPI or a techtrends proxy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Proxy endpoint (e.g. http://127.0.0.1:3000/api/proxy). Without it the
    /// configured NewsAPI key is used directly.
    #[arg(long, global = true)]
    proxy: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Html,
}

#[derive(Subcommand)]
enum Command {
    /// Top technology headlines.
    Featured {
        #[arg(long, default_value_t = DEFAULT_FEATURED_LIMIT)]
        limit: u32,
    },
    /// Headlines for a site category (AI, Programming, Gadgets, Security, all, ...).
    Category {
        name: String,
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,
    },
    /// Search all articles (at least 3 characters).
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,
    },
}

impl Command {
    fn heading(&self) -> String {
        match self {
            Command::Featured { .. } => "Featured".to_string(),
            Command::Category { name, .. } => name.clone(),
            Command::Search { query, .. } => format!("Search: {query}"),
        }
    }

    fn failure_message(&self) -> String {
        match self {
            Command::Featured { .. } => "Failed to load featured articles".to_string(),
            Command::Category { name, .. } => format!("Failed to load {name} articles"),
            Command::Search { .. } => "Search failed. Please try again.".to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    log_subscriber(std::io::stderr).init();

    let args = Args::parse();

    match run(&args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            if matches!(args.format, Format::Html) {
                println!("{}", render_page("TechTrends", &render_error(&args.command.failure_message())));
            }
            ExitCode::FAILURE
        }
    }
}

/// JSON log lines filtered by `RUST_LOG`, kept off stdout.
fn log_subscriber<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .json()
        .finish()
}

async fn run(args: &Args) -> Result<String> {
    let config = AppConfig::load().context("loading configuration")?;
    let client_config =
        NewsClientConfig::from_app_config(&config, args.proxy.as_deref()).context("configuring news client")?;
    let client = NewsClient::new(client_config, RequestCache::new(config.client_cache_ttl()))?;

    let articles = fetch(&client, &args.command)
        .await
        .inspect_err(|e| tracing::error!("{}: {}", args.command.failure_message(), e))?;

    match args.format {
        Format::Json => Ok(serde_json::to_string_pretty(&articles)?),
        Format::Html => {
            let body = match &args.command {
                Command::Featured { .. } => render_featured(&articles),
                Command::Category { name, .. } => render_article_list(name, &articles),
                Command::Search { query, .. } => render_search_results(query, &articles),
            };
            Ok(render_page(&format!("TechTrends - {}", args.command.heading()), &body))
        }
    }
}

async fn fetch(client: &NewsClient, command: &Command) -> Result<Vec<FormattedArticle>, ClientError> {
    match command {
        Command::Featured { limit } => client.get_featured_articles(*limit).await,
        Command::Category { name, page, per_page } => client.get_articles_by_category(name, *page, *per_page).await,
        Command::Search { query, page, per_page } => client.search_articles(query, *page, *per_page).await,
    }
}
