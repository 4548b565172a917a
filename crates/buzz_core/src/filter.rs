//! Predicate state for the article list and the pure functions that apply it.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::types::Article;

/// Articles with more views than this count as high traffic.
pub const HIGH_TRAFFIC_VIEWS: u64 = 10_000;

/// Sentinel shown at the top of every dropdown.
pub const ALL: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Exact(String),
}

impl Selection {
    pub fn exact(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == ALL {
            Selection::All
        } else {
            Selection::Exact(value)
        }
    }

    /// Absent fields never match an exact selection.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Exact(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Selection::exact(s))
    }
}

impl From<Option<String>> for Selection {
    fn from(value: Option<String>) -> Self {
        value.map(Selection::exact).unwrap_or_default()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Exact(value) => f.write_str(value),
        }
    }
}

/// One user interaction with the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Search(String),
    Category(Selection),
    Status(Selection),
    Author(Selection),
    ToggleAi(bool),
    ToggleVideo(bool),
    ToggleHighTraffic(bool),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub category: Selection,
    pub status: Selection,
    pub author: Selection,
    pub ai_only: bool,
    pub video_only: bool,
    pub high_traffic_only: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a single action. `Clear` resets everything at once.
    pub fn apply(&mut self, action: FilterAction) {
        match action {
            FilterAction::Search(query) => self.query = query,
            FilterAction::Category(selection) => self.category = selection,
            FilterAction::Status(selection) => self.status = selection,
            FilterAction::Author(selection) => self.author = selection,
            FilterAction::ToggleAi(on) => self.ai_only = on,
            FilterAction::ToggleVideo(on) => self.video_only = on,
            FilterAction::ToggleHighTraffic(on) => self.high_traffic_only = on,
            FilterAction::Clear => *self = Self::default(),
        }
    }

    pub fn with(mut self, action: FilterAction) -> Self {
        self.apply(action);
        self
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, article: &Article) -> bool {
        self.matches_query(article)
            && self.category.matches(article.category.as_deref())
            && self.status.matches(article.status.as_ref().map(|s| s.as_str()))
            && self.author.matches(article.author.as_deref())
            && (!self.ai_only || article.is_ai)
            && (!self.video_only || article.has_video)
            && (!self.high_traffic_only || article.is_high_traffic())
    }

    fn matches_query(&self, article: &Article) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        article.title.to_lowercase().contains(&needle)
            || article
                .author
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
    }

    pub fn filter<'a>(&'a self, articles: &'a [Article]) -> impl Iterator<Item = &'a Article> + 'a {
        articles.iter().filter(move |article| self.matches(article))
    }
}

/// Distinct non-empty values in first-seen order, prefixed with `All`.
pub fn distinct_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut out = vec![ALL.to_string()];
    for value in values.into_iter().flatten() {
        if value.is_empty() || value == ALL {
            continue;
        }
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}

pub fn categories(articles: &[Article]) -> Vec<String> {
    distinct_values(articles.iter().map(|a| a.category.as_deref()))
}

pub fn authors(articles: &[Article]) -> Vec<String> {
    distinct_values(articles.iter().map(|a| a.author.as_deref()))
}

pub fn statuses(articles: &[Article]) -> Vec<String> {
    distinct_values(articles.iter().map(|a| a.status.as_ref().map(|s| s.as_str())))
}
