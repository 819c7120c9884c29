//! HTML rendering of formatted articles.
//!
//! Renders already-formatted articles into page fragments. Nothing here
//! fetches data; callers hand in the output of [`crate::NewsClient`].
//! All interpolated values are HTML-escaped.

use techtrends_core::FormattedArticle;

/// Featured grid shown at the top of the landing page.
pub fn render_featured(articles: &[FormattedArticle]) -> String {
    let items: String = articles
        .iter()
        .map(|a| {
            format!(
                r#"<article class="featured-article">
  <div class="article-image" style="background-image: url('{image}')">
    <span class="article-category">{category}</span>
  </div>
  <div class="article-content">
    <h3 class="article-title"><a href="{url}" target="_blank" rel="noopener">{title}</a></h3>
    <p class="article-excerpt">{excerpt}</p>
    <div class="article-meta">
      <span>{date}</span>
      <span>By {author}</span>
    </div>
  </div>
</article>
"#,
                image = escape_html(&a.image),
                category = escape_html(&a.category),
                url = escape_html(&a.url),
                title = escape_html(&a.title),
                excerpt = escape_html(&a.excerpt),
                date = escape_html(&a.date),
                author = escape_html(&a.author),
            )
        })
        .collect();

    format!("<section class=\"featured-grid\">\n{items}</section>\n")
}

/// News cards for a category tab or a search result page.
pub fn render_article_list(heading: &str, articles: &[FormattedArticle]) -> String {
    if articles.is_empty() {
        return format!(
            "<section class=\"news-grid\">\n<h2>{}</h2>\n<p class=\"empty\">No articles found.</p>\n</section>\n",
            escape_html(heading)
        );
    }

    let cards: String = articles.iter().map(render_card).collect();
    format!("<section class=\"news-grid\">\n<h2>{}</h2>\n{cards}</section>\n", escape_html(heading))
}

/// Results for a search query.
pub fn render_search_results(query: &str, articles: &[FormattedArticle]) -> String {
    render_article_list(&format!("Search results for \"{query}\""), articles)
}

/// User-visible error banner.
pub fn render_error(message: &str) -> String {
    format!("<div class=\"error-message\" role=\"alert\">{}</div>\n", escape_html(message))
}

/// Wrap a fragment in a standalone HTML document.
pub fn render_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(title)
    )
}

fn render_card(a: &FormattedArticle) -> String {
    format!(
        r#"<article class="news-card" id="{id}">
  <div class="news-img"><img src="{image}" alt="{title}"></div>
  <div class="news-content">
    <span class="news-category">{category}</span>
    <h3 class="news-title"><a href="{url}" target="_blank" rel="noopener">{title}</a></h3>
    <p class="news-excerpt">{excerpt}</p>
    <div class="news-meta">
      <span>{date}</span>
      <span>{read_time}</span>
      <span>{source}</span>
    </div>
  </div>
</article>
"#,
        id = escape_html(&a.id),
        image = escape_html(&a.image),
        title = escape_html(&a.title),
        category = escape_html(&a.category),
        url = escape_html(&a.url),
        excerpt = escape_html(&a.excerpt),
        date = escape_html(&a.date),
        read_time = escape_html(&a.read_time),
        source = escape_html(&a.source),
    )
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use techtrends_core::RawArticle;
    use techtrends_core::article::format_article;

    fn sample() -> FormattedArticle {
        let raw = RawArticle {
            title: Some("Rust & <WebAssembly>".into()),
            url: Some("https://example.com/wasm".into()),
            description: Some("It's fast".into()),
            ..Default::default()
        };
        format_article(&raw, "Programming")
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">O'Neil & co</a>"#), "&lt;a href=&quot;x&quot;&gt;O&#x27;Neil &amp; co&lt;/a&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_featured_escapes_fields() {
        let html = render_featured(&[sample()]);
        assert!(html.contains("featured-grid"));
        assert!(html.contains("Rust &amp; &lt;WebAssembly&gt;"));
        assert!(html.contains("It&#x27;s fast"));
        assert!(html.contains("By Unknown Author"));
        assert!(!html.contains("<WebAssembly>"));
    }

    #[test]
    fn test_render_article_list() {
        let html = render_article_list("Programming", &[sample(), sample()]);
        assert_eq!(html.matches("class=\"news-card\"").count(), 2);
        assert!(html.contains("<h2>Programming</h2>"));
        assert!(html.contains("1 min"));
    }

    #[test]
    fn test_render_empty_list() {
        let html = render_article_list("Gadgets", &[]);
        assert!(html.contains("No articles found."));
    }

    #[test]
    fn test_render_search_results_heading() {
        let html = render_search_results("<script>", &[]);
        assert!(html.contains("Search results for &quot;&lt;script&gt;&quot;"));
    }

    #[test]
    fn test_render_error_and_page() {
        let banner = render_error("Failed to load featured articles");
        assert!(banner.contains("error-message"));

        let page = render_page("TechTrends", &banner);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>TechTrends</title>"));
        assert!(page.contains("Failed to load featured articles"));
    }
}
