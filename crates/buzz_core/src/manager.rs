use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::filter::{self, FilterAction, FilterState};
use crate::source::ArticleSource;
use crate::types::{Article, ArticleStatus};

const COPY_SUFFIX: &str = " (Copy)";
const NO_STATUS: &str = "-";

/// Counts shown above the article table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    pub visible: usize,
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
}

/// In-memory working set of articles plus the current filter controls.
///
/// Nothing here is ever written back to the source.
#[derive(Debug, Default)]
pub struct ArticleManager {
    articles: Vec<Article>,
    filters: FilterState,
}

impl ArticleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles,
            filters: FilterState::default(),
        }
    }

    /// Replaces the working set with whatever the source returns.
    ///
    /// A failed fetch is logged and leaves the list empty.
    pub async fn load(&mut self, source: &dyn ArticleSource) -> usize {
        info!("📰 Fetching articles from {}", source.name());
        match source.fetch_articles().await {
            Ok(articles) => {
                info!("✨ Loaded {} articles from {}", articles.len(), source.name());
                self.articles = articles;
            }
            Err(e) => {
                error!("Failed to fetch articles from {}: {}", source.name(), e);
                self.articles.clear();
            }
        }
        self.articles.len()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn dispatch(&mut self, action: FilterAction) {
        debug!("Filter action: {:?}", action);
        self.filters.apply(action);
    }

    pub fn visible(&self) -> Vec<&Article> {
        self.filters.filter(&self.articles).collect()
    }

    pub fn categories(&self) -> Vec<String> {
        filter::categories(&self.articles)
    }

    pub fn authors(&self) -> Vec<String> {
        filter::authors(&self.articles)
    }

    pub fn statuses(&self) -> Vec<String> {
        filter::statuses(&self.articles)
    }

    pub fn summary(&self) -> ViewSummary {
        let visible = self.visible();
        let mut by_status = BTreeMap::new();
        for article in &visible {
            let status = article
                .status
                .as_ref()
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| NO_STATUS.to_string());
            *by_status.entry(status).or_insert(0) += 1;
        }
        ViewSummary {
            visible: visible.len(),
            total: self.articles.len(),
            by_status,
        }
    }

    /// Duplicates an article as a new draft at the head of the list.
    ///
    /// Unknown ids are a no-op.
    pub fn clone_article(&mut self, id: &str) -> Option<&Article> {
        let original = self.articles.iter().find(|a| a.id == id)?;

        let taken: HashSet<&str> = self.articles.iter().map(|a| a.id.as_str()).collect();
        let mut new_id = Uuid::new_v4().to_string();
        while taken.contains(new_id.as_str()) {
            new_id = Uuid::new_v4().to_string();
        }

        let copy = Article {
            id: new_id,
            title: format!("{}{}", original.title, COPY_SUFFIX),
            status: Some(ArticleStatus::Draft),
            created_at: Some(Utc::now()),
            ..original.clone()
        };
        info!("📝 Cloned article {} as {}", id, copy.id);
        self.articles.insert(0, copy);
        self.articles.first()
    }
}
