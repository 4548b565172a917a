use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArticleStatus {
    Published,
    Draft,
    Scheduled,
    /// Anything else the backend sends, kept verbatim
    Other(String),
}

impl ArticleStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ArticleStatus::Published => "Published",
            ArticleStatus::Draft => "Draft",
            ArticleStatus::Scheduled => "Scheduled",
            ArticleStatus::Other(s) => s,
        }
    }
}

impl From<String> for ArticleStatus {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "published" => ArticleStatus::Published,
            "draft" => ArticleStatus::Draft,
            "scheduled" => ArticleStatus::Scheduled,
            _ => ArticleStatus::Other(value),
        }
    }
}

impl From<&str> for ArticleStatus {
    fn from(value: &str) -> Self {
        ArticleStatus::from(value.to_string())
    }
}

impl From<ArticleStatus> for String {
    fn from(value: ArticleStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An article in the working set, after flag enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub status: Option<ArticleStatus>,
    pub views: u64,
    #[serde(rename = "isAI")]
    pub is_ai: bool,
    pub has_video: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn is_high_traffic(&self) -> bool {
        self.views > crate::filter::HIGH_TRAFFIC_VIEWS
    }
}

/// Article object exactly as the articles endpoint returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub author_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<ArticleStatus>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default, rename = "isAI", alias = "isAi")]
    pub is_ai: Option<bool>,
    #[serde(default)]
    pub has_video: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ArticleRecord {
    /// First non-empty of `authorName`, `author`, `authorId`.
    pub fn resolved_author(&self) -> Option<String> {
        [&self.author_name, &self.author, &self.author_id]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Builds the working-set article with the given display flags.
    pub fn into_article(self, is_ai: bool, has_video: bool) -> Article {
        let author = self.resolved_author();
        Article {
            id: self.id,
            title: self.title.unwrap_or_default(),
            author,
            category: self.category.filter(|c| !c.is_empty()),
            status: self.status,
            views: self.views.unwrap_or(0),
            is_ai,
            has_video,
            created_at: self.created_at,
        }
    }
}

/// Body of `GET /api/articles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlesResponse {
    #[serde(default)]
    pub articles: Vec<ArticleRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(ArticleStatus::from("published"), ArticleStatus::Published);
        assert_eq!(ArticleStatus::from("Draft"), ArticleStatus::Draft);
        assert_eq!(ArticleStatus::from("SCHEDULED"), ArticleStatus::Scheduled);
        assert_eq!(
            ArticleStatus::from("Archived"),
            ArticleStatus::Other("Archived".to_string())
        );
        assert_eq!(ArticleStatus::Other("Archived".to_string()).to_string(), "Archived");
    }

    #[test]
    fn test_record_decoding() {
        let body = r#"{
            "articles": [
                {"_id": "a1", "title": "Spring looks", "authorName": "Ana", "category": "Fashion",
                 "status": "published", "views": 12000, "createdAt": "2024-03-01T10:00:00Z"},
                {"id": 7, "title": "Untitled", "authorId": 42, "status": "Archived"},
                {"id": "a3", "isAI": true, "hasVideo": false},
                {"_id": "a4", "title": "T", "author": "64f0c0ffee", "authorName": "Ana", "views": 5},
                {"_id": "a5", "author": "Ben", "authorId": "u-2"}
            ]
        }"#;
        let response: ArticlesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.articles.len(), 5);

        let first = &response.articles[0];
        assert_eq!(first.id, "a1");
        assert_eq!(first.resolved_author().as_deref(), Some("Ana"));
        assert_eq!(first.status, Some(ArticleStatus::Published));
        assert_eq!(first.views, Some(12000));
        assert!(first.created_at.is_some());

        let second = &response.articles[1];
        assert_eq!(second.id, "7");
        assert_eq!(second.resolved_author().as_deref(), Some("42"));
        assert_eq!(second.status, Some(ArticleStatus::Other("Archived".to_string())));

        let third = response.articles[2].clone();
        assert_eq!(third.is_ai, Some(true));
        assert_eq!(third.has_video, Some(false));
        let article = third.into_article(true, false);
        assert_eq!(article.title, "");
        assert_eq!(article.author, None);
        assert_eq!(article.views, 0);

        let both = &response.articles[3];
        assert_eq!(both.author.as_deref(), Some("64f0c0ffee"));
        assert_eq!(both.resolved_author().as_deref(), Some("Ana"));
        assert_eq!(response.articles[4].resolved_author().as_deref(), Some("Ben"));
    }

    #[test]
    fn test_empty_author_name_falls_back_to_id() {
        let record = ArticleRecord {
            id: "x".to_string(),
            author_name: Some(String::new()),
            author_id: Some("editor-3".to_string()),
            ..Default::default()
        };
        assert_eq!(record.resolved_author().as_deref(), Some("editor-3"));
    }

    #[test]
    fn test_missing_articles_field_is_empty() {
        let response: ArticlesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.articles.is_empty());
    }
}
