pub mod error;
pub mod filter;
pub mod manager;
pub mod source;
pub mod types;

pub use error::Error;
pub use filter::{FilterAction, FilterState, Selection, HIGH_TRAFFIC_VIEWS};
pub use manager::{ArticleManager, ViewSummary};
pub use source::ArticleSource;
pub use types::{Article, ArticleStatus, ArticlesResponse};

pub type Result<T> = std::result::Result<T, Error>;
