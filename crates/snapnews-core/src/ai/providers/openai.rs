use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionStreamResponse,
    },
    Client,
};
use futures::StreamExt;

use super::{ChatRequest, CompletionProvider, FragmentStream};
use crate::{Error, Result};

/// OpenAI-compatible streaming chat provider
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, api_base: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base.trim_end_matches('/'));
        let client = Client::with_config(config);

        Self { client }
    }

    fn build_request(request: &ChatRequest) -> Result<CreateChatCompletionRequest> {
        CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(request.system.as_str())
                        .build()
                        .map_err(|e| Error::AiProvider(e.to_string()))?,
                ),
                ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(request.user.as_str())
                        .build()
                        .map_err(|e| Error::AiProvider(e.to_string()))?,
                ),
            ])
            .stream(true)
            .temperature(request.temperature)
            .max_tokens(request.max_tokens)
            .build()
            .map_err(|e| Error::AiProvider(e.to_string()))
    }
}

/// Content delta of the first choice; chunks without one carry no text
fn chunk_text(chunk: CreateChatCompletionStreamResponse) -> String {
    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn stream_chat(&self, request: ChatRequest) -> Result<FragmentStream> {
        let request = Self::build_request(&request)?;

        let stream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|e| Error::AiProvider(e.to_string()))?;

        let fragments = stream.map(|item| match item {
            Ok(chunk) => Ok(chunk_text(chunk)),
            Err(e) => Err(Error::AiProvider(e.to_string())),
        });

        Ok(Box::pin(fragments))
    }
}
