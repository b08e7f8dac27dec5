mod fetcher;
mod models;

pub use fetcher::{build_query, NewsFetcher, MAX_PAGE_SIZE};
pub use models::{normalize_articles, Article, RawArticle, RawSource, SearchResponse};
