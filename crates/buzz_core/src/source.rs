use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human readable name used in log lines
    fn name(&self) -> &str;

    /// Fetch the full article collection
    async fn fetch_articles(&self) -> Result<Vec<Article>>;
}
