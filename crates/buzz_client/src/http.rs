use async_trait::async_trait;
use buzz_core::{Article, ArticleSource, ArticlesResponse, Error, Result};
use url::Url;

use crate::enrich::FlagEnricher;
use crate::logging::Logger;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/articles";

/// Reads the article collection from the admin API with a single GET.
#[derive(Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: Url,
    enricher: FlagEnricher,
    logger: Logger,
}

impl HttpSource {
    pub fn new(endpoint: &str, enricher: FlagEnricher) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                endpoint,
                endpoint.scheme()
            )));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            enricher,
            logger: Logger::new().with_prefix("[http]"),
        })
    }
}

#[async_trait]
impl ArticleSource for HttpSource {
    fn name(&self) -> &str {
        self.endpoint.as_str()
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        self.logger.debug(&format!("GET {}", self.endpoint));
        let response = self.client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            self.logger.warn(&format!("GET {} returned {}", self.endpoint, status));
            return Err(Error::Fetch(format!(
                "{} responded with {}",
                self.endpoint, status
            )));
        }

        let body = response.text().await?;
        let parsed: ArticlesResponse = serde_json::from_str(&body)?;
        self.logger.debug(&format!(
            "Decoded {} article records ({} bytes)",
            parsed.articles.len(),
            body.len()
        ));
        Ok(self.enricher.enrich_all(parsed.articles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::FlagPolicy;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use buzz_core::{ArticleManager, ArticleStatus};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/articles", addr)
    }

    fn payload_source(endpoint: &str) -> HttpSource {
        HttpSource::new(endpoint, FlagEnricher::new(FlagPolicy::Payload)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_endpoints() {
        assert!(matches!(
            HttpSource::new("not a url", FlagEnricher::default()),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpSource::new("ftp://example.com/articles", FlagEnricher::default()),
            Err(Error::InvalidUrl(_))
        ));
        assert!(HttpSource::new(DEFAULT_ENDPOINT, FlagEnricher::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_articles() {
        let router = Router::new().route(
            "/api/articles",
            get(|| async {
                Json(json!({
                    "articles": [
                        {"_id": "a1", "title": "Spring looks", "authorName": "Ana", "category": "Fashion",
                         "status": "Published", "views": 15000, "isAI": true, "hasVideo": false},
                        {"_id": "a2", "title": "Rates hold", "authorId": "u-9", "category": "Finance",
                         "status": "Draft", "views": 300}
                    ]
                }))
            }),
        );
        let endpoint = serve(router).await;

        let articles = payload_source(&endpoint).fetch_articles().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, "a1");
        assert!(articles[0].is_ai);
        assert!(articles[0].is_high_traffic());
        assert_eq!(articles[1].author.as_deref(), Some("u-9"));
        assert_eq!(articles[1].status, Some(ArticleStatus::Draft));
        assert!(!articles[1].is_ai);
        assert!(!articles[1].has_video);
    }

    #[tokio::test]
    async fn test_server_error_is_a_fetch_error() {
        let router = Router::new().route(
            "/api/articles",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let endpoint = serve(router).await;

        let err = payload_source(&endpoint).fetch_articles().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_serialization_error() {
        let router = Router::new().route("/api/articles", get(|| async { "<html>oops</html>" }));
        let endpoint = serve(router).await;

        let err = payload_source(&endpoint).fetch_articles().await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn test_manager_falls_back_to_empty_list() {
        let router = Router::new().route(
            "/api/articles",
            get(|| async { (StatusCode::NOT_FOUND, "missing") }),
        );
        let endpoint = serve(router).await;

        let mut manager = ArticleManager::new();
        assert_eq!(manager.load(&payload_source(&endpoint)).await, 0);
        assert!(manager.is_empty());
    }
}
