//! Saving results to disk and previewing them in the system browser.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::app::Result;
use crate::document::{
    generate_document, html_export_filename, json_export_filename, DocumentConfig,
};
use crate::domain::ArticleResult;

pub struct Exporter {
    directory: PathBuf,
    preview_directory: PathBuf,
    document: DocumentConfig,
}

impl Exporter {
    pub fn new(directory: PathBuf, document: DocumentConfig) -> Self {
        Self {
            directory,
            preview_directory: std::env::temp_dir().join("gleaner"),
            document,
        }
    }

    /// Put preview files somewhere other than the system temp directory.
    pub fn with_preview_directory(mut self, dir: PathBuf) -> Self {
        self.preview_directory = dir;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn document_config(&self) -> &DocumentConfig {
        &self.document
    }

    /// Write the pretty-printed result as `article_<epoch-ms>.json`.
    pub fn export_json(&self, result: &ArticleResult) -> Result<PathBuf> {
        self.export_json_at(result, Utc::now())
    }

    pub fn export_json_at(&self, result: &ArticleResult, now: DateTime<Utc>) -> Result<PathBuf> {
        let json = result.to_pretty_json()?;
        let path = write_file(&self.directory, &json_export_filename(now), &json)?;
        info!("Exported JSON to {}", path.display());
        Ok(path)
    }

    /// Write the generated document under a timestamped, title-derived name.
    pub fn export_html(&self, result: &ArticleResult) -> Result<PathBuf> {
        self.export_html_at(result, Utc::now())
    }

    pub fn export_html_at(&self, result: &ArticleResult, now: DateTime<Utc>) -> Result<PathBuf> {
        let html = generate_document(result, &self.document, now);
        let path = write_file(&self.directory, &html_export_filename(result, now), &html)?;
        info!("Exported HTML to {}", path.display());
        Ok(path)
    }

    /// Write the generated document to the preview directory without opening it.
    pub fn write_preview(&self, result: &ArticleResult, now: DateTime<Utc>) -> Result<PathBuf> {
        let html = generate_document(result, &self.document, now);
        let filename = format!("preview_{}.html", now.timestamp_millis());
        write_file(&self.preview_directory, &filename, &html)
    }

    /// Generate the document and open it in the system browser.
    pub fn preview_html(&self, result: &ArticleResult) -> Result<PathBuf> {
        let path = self.write_preview(result, Utc::now())?;
        open::that(&path)?;
        info!("Opened preview {}", path.display());
        Ok(path)
    }
}

fn write_file(dir: &Path, filename: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn exporter(dir: &TempDir) -> Exporter {
        Exporter::new(dir.path().join("exports"), DocumentConfig::default())
            .with_preview_directory(dir.path().join("preview"))
    }

    fn article() -> ArticleResult {
        let json = r#"{
            "title": "A/B: Test",
            "author": "Ann",
            "content": "Hello\n\nWorld",
            "images": [{"src": "https://img/1.png", "caption": "One"}],
            "scrape_time": "2024-05-01 10:20:30",
            "url_number": 12
        }"#;
        serde_json::from_str(json).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap()
    }

    #[test]
    fn test_json_export_round_trips() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&dir);
        let article = article();

        let path = exporter.export_json_at(&article, now()).unwrap();
        assert_eq!(path.file_name().unwrap(), "article_1714558830000.json");

        let text = fs::read_to_string(&path).unwrap();
        let parsed: ArticleResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, article);
    }

    #[test]
    fn test_html_export_name_and_content() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&dir);

        let path = exporter.export_html_at(&article(), now()).unwrap();
        assert_eq!(
            path,
            dir.path().join("exports").join("2024-05-01T10-20-30_AB Test.html")
        );

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("<title>A/B: Test</title>"));
        assert!(html.contains("<figcaption>One</figcaption>"));
    }

    #[test]
    fn test_preview_written_to_preview_directory() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter(&dir);

        let path = exporter.write_preview(&article(), now()).unwrap();
        assert!(path.starts_with(dir.path().join("preview")));
        assert!(fs::read_to_string(&path).unwrap().contains("<!DOCTYPE html>"));
        assert!(!dir.path().join("exports").exists());
    }
}
