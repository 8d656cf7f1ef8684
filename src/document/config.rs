use serde::{Deserialize, Serialize};

/// Settings for generated HTML documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Publisher / `og:site_name`
    pub site_name: String,

    /// Base path canonical URLs are built under
    pub canonical_base: String,

    /// Fixed keywords placed before the ones taken from the title
    pub keywords: Vec<String>,

    /// `<html lang>`
    pub lang: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            site_name: "Article Scraper".to_string(),
            canonical_base: "https://example.com/articles/".to_string(),
            keywords: vec![
                "wechat".to_string(),
                "article".to_string(),
                "news".to_string(),
                "blog".to_string(),
            ],
            lang: "zh-CN".to_string(),
        }
    }
}
