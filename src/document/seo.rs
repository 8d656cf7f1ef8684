//! SEO metadata for generated documents: keywords, canonical URL, JSON-LD.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;

use crate::document::DocumentConfig;
use crate::domain::{ArticleResult, UNKNOWN};

const MAX_TITLE_KEYWORDS: usize = 5;
const MAX_KEYWORDS: usize = 10;
const BODY_EXCERPT_CHARS: usize = 500;

fn is_keyword_separator(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            ',' | '，'
                | '。'
                | '！'
                | '？'
                | '；'
                | '：'
                | '（'
                | '）'
                | '【'
                | '】'
                | '!'
                | '?'
                | ';'
                | ':'
                | '('
                | ')'
                | '"'
                | '\''
                | '“'
                | '”'
                | '‘'
                | '’'
        )
}

/// ASCII word characters, whitespace and `-`.
pub(crate) fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c.is_whitespace()
}

/// Comma-joined keywords: the configured terms, then up to five title fragments.
pub fn generate_keywords(result: &ArticleResult, config: &DocumentConfig) -> String {
    let mut keywords: Vec<&str> = config.keywords.iter().map(String::as_str).collect();

    if let Some(title) = result.title() {
        keywords.extend(
            title
                .split(is_keyword_separator)
                .filter(|word| word.chars().count() > 1)
                .take(MAX_TITLE_KEYWORDS),
        );
    }

    keywords.truncate(MAX_KEYWORDS);
    keywords.join(",")
}

/// Lower-cased, hyphenated slug of `title`.
pub fn slugify(title: &str) -> String {
    let kept: String = title.chars().filter(|c| is_slug_char(*c)).collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

pub fn generate_canonical_url(result: &ArticleResult, config: &DocumentConfig) -> String {
    let slug = slugify(result.title().unwrap_or(UNKNOWN));
    let base = config.canonical_base.trim_end_matches('/');
    format!("{}/{}", base, slug)
}

/// schema.org `Article` JSON-LD, safe to embed in a `<script>` element.
///
/// Both publish and modified dates are the generation time.
pub fn generate_structured_data(
    result: &ArticleResult,
    config: &DocumentConfig,
    now: DateTime<Utc>,
) -> String {
    let generated = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let excerpt: String = result.content().chars().take(BODY_EXCERPT_CHARS).collect();

    let data = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": result.display_title(),
        "description": result.summary(),
        "author": {
            "@type": "Person",
            "name": result.display_author(),
        },
        "publisher": {
            "@type": "Organization",
            "name": config.site_name,
        },
        "datePublished": generated,
        "dateModified": generated,
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": result.url().unwrap_or(""),
        },
        "articleBody": format!("{}...", excerpt),
    });

    serde_json::to_string_pretty(&data)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}
