use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Placeholder shown wherever a title or author is missing.
pub const UNKNOWN: &str = "unknown";

/// A scraped article as returned by the backend once a job completes.
///
/// Immutable once received. The payload is kept as it arrived and is what
/// gets serialized back, including explicit nulls and fields without a typed
/// view. Typed views are read leniently: a field of the wrong type reads as
/// absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArticleResult {
    title: Option<String>,
    author: Option<String>,
    summary: Option<String>,
    content: Option<String>,
    url: Option<String>,
    images: Vec<ImageDescriptor>,
    scrape_time: Option<String>,
    word_count: Option<u64>,
    raw: Map<String, Value>,
}

impl ArticleResult {
    /// An article with no fields at all.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(raw: Map<String, Value>) -> Self {
        let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);

        let images = match raw.get("images") {
            Some(Value::Array(items)) => items.iter().filter_map(ImageDescriptor::from_value).collect(),
            _ => Vec::new(),
        };

        Self {
            title: text("title"),
            author: text("author"),
            summary: text("summary"),
            content: text("content"),
            url: text("url"),
            images,
            scrape_time: text("scrape_time"),
            word_count: raw.get("word_count").and_then(Value::as_u64),
            raw,
        }
    }

    /// The payload as received.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Any backend field by name, including ones without a typed view
    /// (`html_file`, `url_number`, ...).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// Title, or `None` when absent or blank.
    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    pub fn author(&self) -> Option<&str> {
        non_blank(self.author.as_deref())
    }

    pub fn display_title(&self) -> &str {
        self.title().unwrap_or(UNKNOWN)
    }

    pub fn display_author(&self) -> &str {
        self.author().unwrap_or(UNKNOWN)
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }

    pub fn url(&self) -> Option<&str> {
        non_blank(self.url.as_deref())
    }

    /// Images the client can show; entries without a usable source are skipped.
    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn scrape_time(&self) -> Option<&str> {
        self.scrape_time.as_deref()
    }

    /// Word count reported by the backend, else the non-whitespace characters in the content.
    pub fn word_count(&self) -> u64 {
        self.word_count
            .unwrap_or_else(|| self.content().chars().filter(|c| !c.is_whitespace()).count() as u64)
    }

    pub fn display_scrape_time(&self) -> String {
        match self.scrape_time() {
            Some(raw) => format_timestamp(raw),
            None => UNKNOWN.to_string(),
        }
    }

    /// Pretty-printed JSON, the same text used for exports.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ArticleResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ArticleResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::deserialize(deserializer).map(Self::from_map)
    }
}

/// An image referenced by the article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub src: String,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

impl ImageDescriptor {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: None,
            caption: None,
        }
    }

    /// Read one `images` entry: a bare URL string, or an object keyed by
    /// `src` or `url`. Anything else yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(src) if !src.trim().is_empty() => Some(Self::new(src.as_str())),
            Value::Object(fields) => {
                let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
                let src = text("src")
                    .or_else(|| text("url"))
                    .filter(|s| !s.trim().is_empty())?;
                Some(Self {
                    src,
                    alt: text("alt"),
                    caption: text("caption"),
                })
            }
            _ => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Format a backend timestamp for display in local time.
///
/// Accepts RFC 3339 and the backend's `%Y-%m-%d %H:%M:%S`; anything else is
/// shown as-is.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }

    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(DISPLAY).to_string();
        }
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article(value: Value) -> ArticleResult {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Value {
        json!({
            "title": "Hello",
            "author": "Ann",
            "content": "Body text",
            "url": "https://mp.weixin.qq.com/s/abc",
            "scrape_time": "2024-05-01 10:20:30",
            "word_count": 9,
            "html_file": "article_20240501_102030.html",
            "url_number": 7
        })
    }

    #[test]
    fn test_typed_views_and_unknown_fields() {
        let article = article(sample());
        assert_eq!(article.title(), Some("Hello"));
        assert_eq!(article.url(), Some("https://mp.weixin.qq.com/s/abc"));
        assert_eq!(article.word_count(), 9);
        assert_eq!(article.get("url_number"), Some(&json!(7)));
    }

    #[test]
    fn test_pretty_json_round_trips() {
        let article = article(sample());
        let text = article.to_pretty_json().unwrap();
        let parsed: ArticleResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, article);
    }

    #[test]
    fn test_export_keeps_payload_verbatim() {
        let payload = json!({
            "title": "T",
            "author": null,
            "images": [
                {"url": "https://a/1.png", "width": 640},
                {"src": "https://a/2.png", "alt": null},
                "https://a/3.png",
                {"width": 10},
                null
            ]
        });
        let article = article(payload.clone());

        let exported: Value = serde_json::from_str(&article.to_pretty_json().unwrap()).unwrap();
        assert_eq!(exported, payload);

        assert_eq!(article.author(), None);
        let sources: Vec<&str> = article.images().iter().map(|i| i.src.as_str()).collect();
        assert_eq!(sources, ["https://a/1.png", "https://a/2.png", "https://a/3.png"]);
        assert_eq!(article.images()[1].alt, None);
    }

    #[test]
    fn test_wrongly_typed_fields_read_as_absent() {
        let article = article(json!({"title": 42, "images": "nope", "word_count": "many", "content": "a b"}));
        assert_eq!(article.display_title(), "unknown");
        assert!(article.images().is_empty());
        assert_eq!(article.word_count(), 2);
        assert_eq!(article.get("title"), Some(&json!(42)));
    }

    #[test]
    fn test_display_placeholders() {
        let empty = ArticleResult::new();
        assert_eq!(empty.display_title(), "unknown");
        assert_eq!(empty.display_author(), "unknown");

        let blank = article(json!({"title": "   ", "author": "Bob"}));
        assert_eq!(blank.display_title(), "unknown");
        assert_eq!(blank.display_author(), "Bob");
    }

    #[test]
    fn test_images_accept_strings_and_objects() {
        let article = article(json!({"images": ["https://a/1.png", {"url": "https://a/2.png", "alt": "two"}]}));
        assert_eq!(article.images().len(), 2);
        assert_eq!(article.images()[0], ImageDescriptor::new("https://a/1.png"));
        assert_eq!(article.images()[1].src, "https://a/2.png");
        assert_eq!(article.images()[1].alt.as_deref(), Some("two"));
    }

    #[test]
    fn test_null_images_are_empty() {
        assert!(article(json!({"images": null})).images().is_empty());
    }

    #[test]
    fn test_word_count_falls_back_to_content() {
        assert_eq!(article(json!({"content": "ab c\nd"})).word_count(), 4);
        assert_eq!(article(json!({"content": "ab", "word_count": 100})).word_count(), 100);
    }

    #[test]
    fn test_format_timestamp_backend_format() {
        assert_eq!(format_timestamp("2024-05-01 10:20:30"), "2024-05-01 10:20:30");
    }

    #[test]
    fn test_format_timestamp_unparseable_passthrough() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_missing_scrape_time_is_unknown() {
        assert_eq!(ArticleResult::new().display_scrape_time(), "unknown");
    }
}
