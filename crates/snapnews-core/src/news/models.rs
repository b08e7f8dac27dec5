use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// A normalized news article. Every field is a plain string, empty when upstream omitted it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    /// Publisher display name
    pub source: String,
    /// ISO-8601 timestamp as sent by upstream
    pub published_at: String,
    pub image_url: String,
}

impl Article {
    /// Title for display, with a placeholder for untitled items
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(untitled)"
        } else {
            &self.title
        }
    }

    /// Publication date as YYYY-MM-DD, or the raw prefix when it doesn't parse
    pub fn published_date(&self) -> String {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.published_at) {
            return dt.format("%Y-%m-%d").to_string();
        }
        self.published_at.chars().take(10).collect()
    }
}

/// Top-level search response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Option<Vec<RawArticle>>,
    /// Present on error responses
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SearchResponse {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Article as sent by the search API; any field may be missing or null
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Self {
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            source: raw.source.and_then(|s| s.name).unwrap_or_default(),
            published_at: raw.published_at.unwrap_or_default(),
            image_url: raw.url_to_image.unwrap_or_default(),
        }
    }
}

/// Normalize raw search results, preserving upstream order
pub fn normalize_articles(raw: Vec<RawArticle>) -> Vec<Article> {
    raw.into_iter().map(Article::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<Article> {
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        normalize_articles(response.articles.unwrap_or_default())
    }

    #[test]
    fn test_complete_article() {
        let articles = parse(
            r#"{"status":"ok","totalResults":1,"articles":[{
                "source":{"id":null,"name":"新华网"},
                "author":"记者",
                "title":"标题一",
                "description":"描述一",
                "url":"https://example.com/1",
                "urlToImage":"https://example.com/1.png",
                "publishedAt":"2024-06-20T08:30:00Z"
            }]}"#,
        );

        assert_eq!(
            articles,
            vec![Article {
                title: "标题一".to_string(),
                description: "描述一".to_string(),
                url: "https://example.com/1".to_string(),
                source: "新华网".to_string(),
                published_at: "2024-06-20T08:30:00Z".to_string(),
                image_url: "https://example.com/1.png".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let articles = parse(r#"{"status":"ok","articles":[{"url":"https://example.com/2"}]}"#);

        let article = &articles[0];
        assert_eq!(article.url, "https://example.com/2");
        assert_eq!(article.title, "");
        assert_eq!(article.description, "");
        assert_eq!(article.source, "");
        assert_eq!(article.published_at, "");
        assert_eq!(article.image_url, "");
    }

    #[test]
    fn test_null_fields_become_empty() {
        let articles = parse(
            r#"{"status":"ok","articles":[{
                "source":{"id":null,"name":null},
                "title":null,
                "description":null,
                "url":"https://example.com/3",
                "urlToImage":null,
                "publishedAt":null
            },{
                "source":null,
                "title":"t",
                "url":"https://example.com/4"
            }]}"#,
        );

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source, "");
        assert_eq!(articles[0].title, "");
        assert_eq!(articles[0].image_url, "");
        assert_eq!(articles[1].source, "");
        assert_eq!(articles[1].title, "t");
    }

    #[test]
    fn test_error_response_detected() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#,
        )
        .unwrap();

        assert!(response.is_error());
        assert!(response.articles.is_none());
        assert_eq!(response.code.as_deref(), Some("apiKeyInvalid"));
    }

    #[test]
    fn test_published_date() {
        let mut article = Article {
            published_at: "2024-06-20T23:30:00Z".to_string(),
            ..Default::default()
        };
        assert_eq!(article.published_date(), "2024-06-20");

        article.published_at = "2024-06-21 garbage".to_string();
        assert_eq!(article.published_date(), "2024-06-21");

        article.published_at.clear();
        assert_eq!(article.published_date(), "");
    }

    #[test]
    fn test_display_title_placeholder() {
        let article = Article::default();
        assert_eq!(article.display_title(), "(untitled)");
    }
}
