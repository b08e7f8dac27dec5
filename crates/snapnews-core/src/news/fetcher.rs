use std::time::Duration;

use reqwest::{Client, Proxy};
use url::Url;

use super::models::{normalize_articles, Article, SearchResponse};
use crate::config::AppConfig;
use crate::{Error, Result};

/// Largest page the search API accepts
pub const MAX_PAGE_SIZE: usize = 100;
const API_KEY_HEADER: &str = "X-Api-Key";
const ERROR_BODY_PREVIEW: usize = 200;

/// Join tags into one disjunctive search expression.
///
/// Every non-blank tag appears exactly once, in first-occurrence order.
pub fn build_query<S: AsRef<str>>(tags: &[S]) -> String {
    let mut seen: Vec<&str> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen.join(" OR ")
}

/// News search client
pub struct NewsFetcher {
    client: Client,
    endpoint: Url,
    api_key: String,
    language: String,
    sort_by: String,
    page_size: usize,
}

impl NewsFetcher {
    /// Create a new fetcher from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .news_api_key()
            .ok_or_else(|| Error::Config("News API key not configured".to_string()))?;
        let client = Self::build_client(config.news.request_timeout_secs, &config.news.proxy_url)?;
        let endpoint = Self::search_endpoint(&config.news.base_url)?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            language: config.news.language.clone(),
            sort_by: config.news.sort_by.clone(),
            page_size: config.news.page_size,
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true);

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for news fetching");
        }

        builder.build().map_err(Error::Http)
    }

    /// Resolve `{base_url}/everything`, tolerating a missing trailing slash
    fn search_endpoint(base_url: &str) -> Result<Url> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join("everything")?)
    }

    /// Fetch with the configured page size
    pub async fn fetch_default(&self, tags: &[String]) -> Vec<Article> {
        self.fetch(tags, self.page_size).await
    }

    /// Fetch articles for the given tags.
    ///
    /// Never fails: any transport, status or payload problem is logged and
    /// reported as an empty list.
    pub async fn fetch(&self, tags: &[String], limit: usize) -> Vec<Article> {
        match self.try_fetch(tags, limit).await {
            Ok(articles) => {
                tracing::info!("Fetched {} articles for {} tags", articles.len(), tags.len());
                articles
            }
            Err(e) => {
                tracing::error!("Error fetching news: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch articles, surfacing the failure instead of absorbing it
    pub async fn try_fetch(&self, tags: &[String], limit: usize) -> Result<Vec<Article>> {
        let query = build_query(tags);
        let page_size = limit.clamp(1, MAX_PAGE_SIZE);

        tracing::debug!("Searching news: q={:?}, pageSize={}", query, page_size);

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[
                ("q", query),
                ("language", self.language.clone()),
                ("sortBy", self.sort_by.clone()),
                ("pageSize", page_size.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let parsed: Option<SearchResponse> = serde_json::from_slice(&body).ok();
            let (code, message) = match parsed {
                Some(r) => (
                    r.code.unwrap_or_else(|| status.as_str().to_string()),
                    r.message.unwrap_or_else(|| status.to_string()),
                ),
                None => (
                    status.as_str().to_string(),
                    String::from_utf8_lossy(&body)
                        .chars()
                        .take(ERROR_BODY_PREVIEW)
                        .collect(),
                ),
            };
            return Err(Error::NewsApi { code, message });
        }

        let parsed: SearchResponse = serde_json::from_slice(&body)?;

        if parsed.is_error() {
            return Err(Error::NewsApi {
                code: parsed.code.unwrap_or_else(|| "unknown".to_string()),
                message: parsed.message.unwrap_or_default(),
            });
        }

        let raw = parsed
            .articles
            .ok_or_else(|| Error::Other("Search response has no articles".to_string()))?;

        Ok(normalize_articles(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn test_config(base_url: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.news.api_key = Some("test-key".to_string());
        config.news.base_url = base_url.to_string();
        config.news.request_timeout_secs = 1;
        config
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    /// Serve a single canned HTTP response, reporting the request head back
    async fn serve_once(status_line: &'static str, body: String) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (head_tx, head_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = head_tx.send(String::from_utf8_lossy(&buf).to_string());

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (format!("http://{}/v2", addr), head_rx)
    }

    #[test]
    fn test_query_joins_every_tag_once() {
        assert_eq!(build_query(&["AI/ML"]), "AI/ML");
        assert_eq!(build_query(&["AI/ML", "云计算"]), "AI/ML OR 云计算");

        let query = build_query(&["LLM", "RAG", "LLM", " ", "Web3"]);
        assert_eq!(query, "LLM OR RAG OR Web3");
        for tag in ["LLM", "RAG", "Web3"] {
            assert_eq!(query.split(" OR ").filter(|t| *t == tag).count(), 1);
        }
    }

    #[test]
    fn test_search_endpoint_resolution() {
        let with_slash = NewsFetcher::search_endpoint("https://newsapi.org/v2/").unwrap();
        let without_slash = NewsFetcher::search_endpoint("https://newsapi.org/v2").unwrap();
        assert_eq!(with_slash.as_str(), "https://newsapi.org/v2/everything");
        assert_eq!(without_slash.as_str(), "https://newsapi.org/v2/everything");
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = AppConfig::default();
        assert!(matches!(NewsFetcher::new(&config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_fetch_normalizes_articles() {
        let body = r#"{"status":"ok","totalResults":2,"articles":[
            {"source":{"id":null,"name":"36氪"},"title":"大模型新进展","description":"描述","url":"https://example.com/a","urlToImage":"https://example.com/a.jpg","publishedAt":"2024-06-20T08:00:00Z"},
            {"source":{"id":null,"name":"钛媒体"},"title":"云计算市场","description":"描述二","url":"https://example.com/b","publishedAt":"2024-06-20T07:00:00Z"}
        ]}"#;
        let (base_url, head_rx) = serve_once("200 OK", body.to_string()).await;
        let fetcher = NewsFetcher::new(&test_config(&base_url)).unwrap();

        let articles = fetcher.fetch(&tags(&["AI/ML", "云计算"]), 40).await;

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source, "36氪");
        assert_eq!(articles[0].image_url, "https://example.com/a.jpg");
        assert_eq!(articles[1].title, "云计算市场");
        assert_eq!(articles[1].image_url, "");

        let head = head_rx.await.unwrap();
        let request_line = head.lines().next().unwrap();
        let path = request_line.split_whitespace().nth(1).unwrap();
        let url = Url::parse(&format!("http://localhost{}", path)).unwrap();
        assert_eq!(url.path(), "/v2/everything");

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(params.contains(&("q".to_string(), "AI/ML OR 云计算".to_string())));
        assert!(params.contains(&("language".to_string(), "zh".to_string())));
        assert!(params.contains(&("sortBy".to_string(), "publishedAt".to_string())));
        assert!(params.contains(&("pageSize".to_string(), "40".to_string())));
        assert!(head.to_lowercase().contains("x-api-key: test-key"));
    }

    #[tokio::test]
    async fn test_page_size_is_clamped() {
        let (base_url, head_rx) =
            serve_once("200 OK", r#"{"status":"ok","articles":[]}"#.to_string()).await;
        let fetcher = NewsFetcher::new(&test_config(&base_url)).unwrap();

        let articles = fetcher.fetch(&tags(&["LLM"]), 500).await;
        assert!(articles.is_empty());

        let head = head_rx.await.unwrap();
        assert!(head.contains("pageSize=100"));
    }

    #[tokio::test]
    async fn test_api_error_yields_empty() {
        let body = r#"{"status":"error","code":"rateLimited","message":"Too many requests"}"#;
        let (base_url, _head) = serve_once("429 Too Many Requests", body.to_string()).await;
        let fetcher = NewsFetcher::new(&test_config(&base_url)).unwrap();

        let result = fetcher.try_fetch(&tags(&["LLM"]), 10).await;
        match result {
            Err(Error::NewsApi { code, .. }) => assert_eq!(code, "rateLimited"),
            other => panic!("expected NewsApi error, got {:?}", other.map(|a| a.len())),
        }
    }

    #[tokio::test]
    async fn test_error_status_in_ok_body_yields_empty() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"bad key"}"#;
        let (base_url, _head) = serve_once("200 OK", body.to_string()).await;
        let fetcher = NewsFetcher::new(&test_config(&base_url)).unwrap();

        assert!(fetcher.fetch(&tags(&["LLM"]), 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_yields_empty() {
        let (base_url, _head) = serve_once("200 OK", "<html>oops</html>".to_string()).await;
        let fetcher = NewsFetcher::new(&test_config(&base_url)).unwrap();

        assert!(fetcher.fetch(&tags(&["LLM"]), 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_yields_empty() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and never answer
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let fetcher = NewsFetcher::new(&test_config(&format!("http://{}/v2", addr))).unwrap();
        let articles = fetcher.fetch(&tags(&["AI/ML"]), 40).await;

        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_yields_empty() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = NewsFetcher::new(&test_config(&format!("http://{}/v2", addr))).unwrap();
        assert!(fetcher.fetch(&tags(&["AI/ML"]), 40).await.is_empty());
    }
}
