use std::path::{Path, PathBuf};

use async_trait::async_trait;
use buzz_core::{Article, ArticleSource, ArticlesResponse, Result};

use crate::enrich::FlagEnricher;

/// Serves an article list that is already in memory or on disk.
#[derive(Debug)]
pub enum StaticSource {
    Articles(Vec<Article>),
    File { path: PathBuf, enricher: FlagEnricher },
}

impl StaticSource {
    pub fn new(articles: Vec<Article>) -> Self {
        StaticSource::Articles(articles)
    }

    /// Reads the same `{"articles": [...]}` body the API returns.
    pub fn from_file(path: impl AsRef<Path>, enricher: FlagEnricher) -> Self {
        StaticSource::File {
            path: path.as_ref().to_path_buf(),
            enricher,
        }
    }
}

#[async_trait]
impl ArticleSource for StaticSource {
    fn name(&self) -> &str {
        match self {
            StaticSource::Articles(_) => "memory",
            StaticSource::File { path, .. } => path.to_str().unwrap_or("file"),
        }
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        match self {
            StaticSource::Articles(articles) => Ok(articles.clone()),
            StaticSource::File { path, enricher } => {
                let body = tokio::fs::read_to_string(path).await?;
                let parsed: ArticlesResponse = serde_json::from_str(&body)?;
                Ok(enricher.enrich_all(parsed.articles))
            }
        }
    }
}
