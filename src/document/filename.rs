use chrono::{DateTime, Utc};

use crate::document::seo::is_slug_char;
use crate::domain::ArticleResult;

const MAX_TITLE_CHARS: usize = 50;
const UNTITLED: &str = "untitled";

/// `YYYY-MM-DDTHH-MM-SS_<title>.html`, with the title reduced to ASCII word
/// characters, whitespace and hyphens. Exports within the same second collide.
pub fn html_export_filename(result: &ArticleResult, now: DateTime<Utc>) -> String {
    let safe_title: String = result
        .title()
        .unwrap_or(UNTITLED)
        .chars()
        .filter(|c| is_slug_char(*c))
        .take(MAX_TITLE_CHARS)
        .collect();

    format!("{}_{}.html", now.format("%Y-%m-%dT%H-%M-%S"), safe_title)
}

/// `article_<epoch-ms>.json`
pub fn json_export_filename(now: DateTime<Utc>) -> String {
    format!("article_{}.json", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap()
            + chrono::Duration::milliseconds(456)
    }

    fn titled(title: &str) -> ArticleResult {
        serde_json::from_value(serde_json::json!({ "title": title })).unwrap()
    }

    #[test]
    fn test_html_filename_sanitizes_title() {
        let name = html_export_filename(&titled("A/B: Test"), instant());
        assert_eq!(name, "2024-05-01T10-20-30_AB Test.html");

        let (timestamp, rest) = name.split_once('_').unwrap();
        assert_eq!(timestamp.len(), 19);
        assert_eq!(rest, "AB Test.html");
    }

    #[test]
    fn test_html_filename_truncates_title() {
        let name = html_export_filename(&titled(&"x".repeat(80)), instant());
        assert_eq!(name, format!("2024-05-01T10-20-30_{}.html", "x".repeat(50)));
    }

    #[test]
    fn test_html_filename_drops_non_ascii() {
        let name = html_export_filename(&titled("深度学习 Rust"), instant());
        assert_eq!(name, "2024-05-01T10-20-30_ Rust.html");
    }

    #[test]
    fn test_html_filename_without_title() {
        let name = html_export_filename(&ArticleResult::new(), instant());
        assert_eq!(name, "2024-05-01T10-20-30_untitled.html");
    }

    #[test]
    fn test_json_filename_uses_epoch_millis() {
        assert_eq!(json_export_filename(instant()), "article_1714558830456.json");
    }
}
