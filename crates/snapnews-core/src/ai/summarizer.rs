use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::prompt::{build_summary_prompt, MAX_SUMMARY_ARTICLES, SYSTEM_PROMPT};
use super::providers::{ChatRequest, CompletionProvider, OpenAiProvider};
use crate::config::AppConfig;
use crate::news::Article;
use crate::{Error, Result};

/// Prefix of the single fragment emitted when generation fails
pub const SUMMARY_ERROR_PREFIX: &str = "Error generating summary: ";

/// Fragments buffered between the network task and the consumer
const FRAGMENT_BUFFER: usize = 32;

/// Whether a fragment is the terminal error fragment
pub fn is_error_fragment(fragment: &str) -> bool {
    fragment.starts_with(SUMMARY_ERROR_PREFIX)
}

/// Streams a summary of fetched articles from the configured completion provider
pub struct SummaryGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    article_limit: usize,
}

impl SummaryGenerator {
    /// Create a generator backed by the OpenAI-compatible endpoint in config
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .llm_api_key()
            .ok_or_else(|| Error::Config("LLM API key not configured".to_string()))?;

        tracing::debug!("Initializing summary generator with api_base: {}", config.ai.api_base);

        let provider = Arc::new(OpenAiProvider::new(api_key, &config.ai.api_base));
        Ok(Self::with_provider(provider, config))
    }

    /// Create a generator with an explicit provider
    pub fn with_provider(provider: Arc<dyn CompletionProvider>, config: &AppConfig) -> Self {
        Self {
            provider,
            model: config.ai.model.clone(),
            temperature: config.ai.temperature,
            max_tokens: config.ai.max_tokens,
            article_limit: config.ai.summary_article_limit.clamp(1, MAX_SUMMARY_ARTICLES),
        }
    }

    /// Start generating a summary.
    ///
    /// The returned stream yields each non-empty fragment in arrival order.
    /// Any failure ends it with one fragment starting with
    /// [`SUMMARY_ERROR_PREFIX`]. Must be called inside a tokio runtime.
    pub fn generate(&self, articles: &[Article]) -> SummaryStream {
        let included = &articles[..articles.len().min(self.article_limit)];
        let prompt = build_summary_prompt(included);
        tracing::debug!(
            "Generated prompt for {} articles, length: {}",
            included.len(),
            prompt.len()
        );

        let request = ChatRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            user: prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let (tx, rx) = mpsc::channel(FRAGMENT_BUFFER);
        let task = tokio::spawn(drive_completion(Arc::clone(&self.provider), request, tx));

        SummaryStream { rx, task }
    }
}

/// Pump provider fragments into the channel until the stream ends or fails
async fn drive_completion(
    provider: Arc<dyn CompletionProvider>,
    request: ChatRequest,
    tx: mpsc::Sender<String>,
) {
    tracing::debug!("Starting streaming completion via {}", provider.name());

    let mut stream = match provider.stream_chat(request).await {
        Ok(stream) => stream,
        Err(e) => {
            send_error(&tx, e).await;
            return;
        }
    };

    while let Some(item) = stream.next().await {
        match item {
            Ok(fragment) if fragment.is_empty() => {}
            Ok(fragment) => {
                tracing::debug!("Received fragment of {} bytes", fragment.len());
                if tx.send(fragment).await.is_err() {
                    tracing::debug!("Summary consumer went away, stopping stream");
                    return;
                }
            }
            Err(e) => {
                send_error(&tx, e).await;
                return;
            }
        }
    }

    tracing::debug!("Streaming completion finished");
}

async fn send_error(tx: &mpsc::Sender<String>, error: Error) {
    let message = format!("{}{}", SUMMARY_ERROR_PREFIX, error);
    tracing::error!("{}", message);
    let _ = tx.send(message).await;
}

/// Single-consumer stream of summary fragments.
///
/// Dropping it aborts the underlying network task.
pub struct SummaryStream {
    rx: mpsc::Receiver<String>,
    task: JoinHandle<()>,
}

impl SummaryStream {
    /// Stop the generation; pending fragments are discarded
    pub fn cancel(self) {
        drop(self);
    }

    /// Drain the stream into one string
    pub async fn collect_text(self) -> String {
        self.collect::<Vec<String>>().await.concat()
    }
}

impl Stream for SummaryStream {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for SummaryStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}
