//! Standalone HTML documents for scraped articles.
//!
//! ```rust,ignore
//! use gleaner::document::{generate_document, DocumentConfig};
//!
//! let html = generate_document(&article, &DocumentConfig::default(), chrono::Utc::now());
//! ```
//!
//! The document carries its own styles and SEO metadata (keywords,
//! canonical link, Open Graph, Twitter card, schema.org JSON-LD), so it can
//! be saved or previewed without the service.

mod body;
mod config;
mod filename;
mod seo;

pub use body::{cover_image_html, format_content_html, format_images_html};
pub use config::DocumentConfig;
pub use filename::{html_export_filename, json_export_filename};
pub use seo::{generate_canonical_url, generate_keywords, generate_structured_data, slugify};

use chrono::{DateTime, Local, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::domain::ArticleResult;

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .article { background: #fff; border-radius: 10px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); overflow: hidden; }
        .article-header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: #fff; padding: 30px; text-align: center; }
        .article-title { font-size: 2em; margin: 0 0 10px; font-weight: 600; }
        .article-meta { opacity: 0.9; }
        .cover img { width: 100%; display: block; }
        .article-content { padding: 40px; font-size: 16px; line-height: 1.8; color: #333; }
        .article-content p.empty { color: #999; font-style: italic; }
        .gallery { padding: 0 40px 40px; }
        .gallery figure { margin: 0 0 20px; }
        .gallery img { max-width: 100%; border-radius: 6px; }
        .gallery figcaption { font-size: 14px; color: #666; text-align: center; }
        .article-footer { background: #f8f9fa; padding: 20px; text-align: center; color: #666; border-top: 1px solid #e9ecef; font-size: 14px; }
        @media (max-width: 768px) {
            .article-content, .gallery { padding: 20px; }
        }
"#;

/// Render `result` as a complete HTML document generated at `now`.
pub fn generate_document(
    result: &ArticleResult,
    config: &DocumentConfig,
    now: DateTime<Utc>,
) -> String {
    let title = result.display_title();
    let author = result.display_author();
    let summary = result.summary();

    let title_attr = encode_double_quoted_attribute(title);
    let author_attr = encode_double_quoted_attribute(author);
    let summary_attr = encode_double_quoted_attribute(summary);

    let keywords = generate_keywords(result, config);
    let canonical_url = generate_canonical_url(result, config);
    let structured_data = generate_structured_data(result, config, now);
    let generated_at = now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");

    let source_link = match result.url() {
        Some(url) if !url.is_empty() => format!(
            "<div><a href=\"{}\">Original article</a></div>",
            encode_double_quoted_attribute(url)
        ),
        _ => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title_text}</title>
    <meta name="description" content="{summary_attr}">
    <meta name="author" content="{author_attr}">
    <meta name="keywords" content="{keywords}">
    <meta name="robots" content="index, follow">
    <meta name="googlebot" content="index, follow">
    <link rel="canonical" href="{canonical}">

    <!-- Open Graph -->
    <meta property="og:type" content="article">
    <meta property="og:title" content="{title_attr}">
    <meta property="og:description" content="{summary_attr}">
    <meta property="og:author" content="{author_attr}">
    <meta property="og:site_name" content="{site_name}">

    <!-- Twitter -->
    <meta property="twitter:card" content="summary_large_image">
    <meta property="twitter:title" content="{title_attr}">
    <meta property="twitter:description" content="{summary_attr}">

    <script type="application/ld+json">
{structured_data}
    </script>
    <style>{style}</style>
</head>
<body>
    <article class="article">
        <header class="article-header">
            <h1 class="article-title">{title_text}</h1>
            <div class="article-meta">
                <div>Author: {author_text}</div>
                <div>Scraped at: {scrape_time}</div>
                {source_link}
            </div>
        </header>
        {cover}
        <div class="article-content">
{content}
        </div>
        {images}
        <footer class="article-footer">
            <div>Generated at: {generated_at}</div>
            <div>Word count: {word_count}</div>
        </footer>
    </article>
</body>
</html>
"#,
        lang = encode_double_quoted_attribute(&config.lang),
        title_text = encode_text(title),
        summary_attr = summary_attr,
        author_attr = author_attr,
        keywords = encode_double_quoted_attribute(&keywords),
        canonical = encode_double_quoted_attribute(&canonical_url),
        title_attr = title_attr,
        site_name = encode_double_quoted_attribute(&config.site_name),
        structured_data = structured_data,
        style = STYLE,
        author_text = encode_text(author),
        scrape_time = encode_text(&result.display_scrape_time()),
        source_link = source_link,
        cover = cover_image_html(result),
        content = format_content_html(result.content()),
        images = format_images_html(result.images()),
        generated_at = generated_at,
        word_count = result.word_count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article() -> ArticleResult {
        serde_json::from_value(serde_json::json!({
            "title": "Hi There!",
            "author": "Ann \"The Writer\"",
            "summary": "A short summary",
            "content": "Paragraph one.\n\nParagraph <two>.",
            "url": "https://mp.weixin.qq.com/s/abc",
            "images": ["https://img/1.png"]
        }))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap()
    }

    #[test]
    fn test_document_head_metadata() {
        let html = generate_document(&article(), &DocumentConfig::default(), now());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"zh-CN\">"));
        assert!(html.contains("<title>Hi There!</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"A short summary\">"));
        assert!(html.contains("<meta name=\"author\" content=\"Ann &quot;The Writer&quot;\">"));
        assert!(html.contains(
            "<meta name=\"keywords\" content=\"wechat,article,news,blog,Hi,There\">"
        ));
        assert!(html.contains("<meta name=\"robots\" content=\"index, follow\">"));
        assert!(html.contains(
            "<link rel=\"canonical\" href=\"https://example.com/articles/hi-there\">"
        ));
        assert!(html.contains("<meta property=\"og:type\" content=\"article\">"));
        assert!(html.contains("<meta property=\"og:site_name\" content=\"Article Scraper\">"));
        assert!(html.contains("<meta property=\"twitter:card\" content=\"summary_large_image\">"));
        assert!(html.contains("\"datePublished\": \"2024-05-01T10:20:30.000Z\""));
    }

    #[test]
    fn test_document_body() {
        let html = generate_document(&article(), &DocumentConfig::default(), now());

        assert!(html.contains("<h1 class=\"article-title\">Hi There!</h1>"));
        assert!(html.contains("<p>Paragraph &lt;two&gt;.</p>"));
        assert!(html.contains("<div class=\"cover\"><img src=\"https://img/1.png\""));
        assert!(html.contains("<a href=\"https://mp.weixin.qq.com/s/abc\">Original article</a>"));
        assert!(html.contains("Word count: "));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_document_for_empty_result() {
        let html = generate_document(&ArticleResult::new(), &DocumentConfig::default(), now());
        assert!(html.contains("<title>unknown</title>"));
        assert!(html.contains("href=\"https://example.com/articles/unknown\""));
        assert!(html.contains("No content"));
        assert!(!html.contains("class=\"gallery\""));
    }

    #[test]
    fn test_document_uses_configured_site() {
        let config = DocumentConfig {
            site_name: "Field Notes".into(),
            canonical_base: "https://notes.example.org/a".into(),
            lang: "en".into(),
            ..DocumentConfig::default()
        };
        let html = generate_document(&article(), &config, now());
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("content=\"Field Notes\""));
        assert!(html.contains("href=\"https://notes.example.org/a/hi-there\""));
    }
}
