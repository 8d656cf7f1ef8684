use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{GleanerError, Result};
use crate::client::ScrapeApi;
use crate::domain::{HistoryResponse, JobStatus, ScrapeRequest, SubmitResponse};

pub struct HttpScrapeClient {
    client: Client,
    base: Url,
}

impl HttpScrapeClient {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// `timeout` of `None` leaves requests without a deadline.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base = Url::parse(base_url.trim())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("gleaner/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }
}

#[async_trait]
impl ScrapeApi for HttpScrapeClient {
    async fn submit(&self, request: &ScrapeRequest) -> Result<SubmitResponse> {
        let url = self.endpoint("api/scrape")?;
        tracing::debug!("POST {} for {}", url, request.url);

        let response = self.client.post(url).json(request).send().await?;
        let reply = response.error_for_status()?.json::<SubmitResponse>().await?;
        Ok(reply)
    }

    async fn status(&self) -> Result<JobStatus> {
        let url = self.endpoint("api/status")?;
        let response = self.client.get(url).send().await?;
        let status = response.error_for_status()?.json::<JobStatus>().await?;
        Ok(status)
    }

    async fn history(&self) -> Result<HistoryResponse> {
        let url = self.endpoint("api/history")?;
        let response = self.client.get(url).send().await?;
        let history = response.error_for_status()?.json::<HistoryResponse>().await?;
        Ok(history)
    }

    async fn download(&self, filename: &str) -> Result<Vec<u8>> {
        let url = self.download_url(filename)?;
        let response = self.client.get(url).send().await?;
        let body = response.error_for_status()?.bytes().await?.to_vec();
        Ok(body)
    }

    fn download_url(&self, filename: &str) -> Result<Url> {
        let mut url = self.endpoint("api/download/")?;
        url.path_segments_mut()
            .map_err(|_| GleanerError::Other(format!("Cannot build download URL from {}", self.base)))?
            .pop_if_empty()
            .push(filename);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = HttpScrapeClient::new("http://localhost:3000/scraper", None).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/scraper/");
        assert_eq!(
            client.endpoint("api/status").unwrap().as_str(),
            "http://localhost:3000/scraper/api/status"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpScrapeClient::new("not a url", None),
            Err(GleanerError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_download_url_encodes_filename() {
        let client = HttpScrapeClient::new("http://localhost:3000", None).unwrap();
        let url = client.download_url("my article?.html").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/download/my%20article%3F.html"
        );
    }

    #[tokio::test]
    async fn test_submit_posts_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scrape"))
            .and(body_json(serde_json::json!({"url": "https://example.com/a"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "message": "started"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpScrapeClient::new(&server.uri(), None).unwrap();
        let request = ScrapeRequest::new("https://example.com/a").unwrap();
        let reply = client.submit(&request).await.unwrap();
        assert!(reply.success);
        assert_eq!(reply.message.as_deref(), Some("started"));
    }

    #[tokio::test]
    async fn test_status_parses_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "is_running": true,
                "progress": 50,
                "message": "Parsing content...",
                "result": null,
                "error": null
            })))
            .mount(&server)
            .await;

        let client = HttpScrapeClient::new(&server.uri(), None).unwrap();
        let status = client.status().await.unwrap();
        assert!(status.is_running);
        assert_eq!(status.progress, 50.0);
        assert_eq!(status.message, "Parsing content...");
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/history"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = HttpScrapeClient::new(&server.uri(), None).unwrap();
        let err = client.history().await.unwrap_err();
        assert!(matches!(err, GleanerError::Http(_)));
    }

    #[tokio::test]
    async fn test_download_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/download/a.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = HttpScrapeClient::new(&server.uri(), None).unwrap();
        let body = client.download("a.json").await.unwrap();
        assert_eq!(body, b"{}");
    }

    #[tokio::test]
    async fn test_timeout_applies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(serde_json::json!({"is_running": true})),
            )
            .mount(&server)
            .await;

        let client =
            HttpScrapeClient::new(&server.uri(), Some(Duration::from_millis(50))).unwrap();
        let err = client.status().await.unwrap_err();
        assert!(matches!(err, GleanerError::Http(ref e) if e.is_timeout()));
    }
}
