mod openai;

pub use openai::OpenAiProvider;

use std::pin::Pin;

use futures::Stream;

use crate::Result;

/// Ordered stream of content fragments from a streaming completion
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// One streaming chat completion: a system persona plus a user prompt
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Trait for streaming chat-completion backends
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Start a streaming completion.
    ///
    /// Setup failures are returned directly; failures after the stream is
    /// open surface as an `Err` item.
    async fn stream_chat(&self, request: ChatRequest) -> Result<FragmentStream>;
}
