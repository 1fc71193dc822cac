//! Chat completions through the OpenAI API.

use super::{CompletionProvider, CompletionRequest};
use crate::config::{Credentials, SummarySettings};
use crate::error::{Result, Service, TldwError};
use crate::openai::create_client;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Completion provider backed by an OpenAI-compatible chat endpoint.
pub struct OpenAiCompletionProvider {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiCompletionProvider {
    pub fn new(credentials: &Credentials, settings: &SummarySettings) -> Result<Self> {
        Ok(Self {
            client: create_client(credentials, settings)?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.clone())
                .build()
                .map_err(|e| TldwError::Config(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user.clone())
                .build()
                .map_err(|e| TldwError::Config(e.to_string()))?
                .into(),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| TldwError::Config(e.to_string()))?;

        debug!("Sending {} prompt characters", request.user.chars().count());
        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(classify_openai_error)?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| TldwError::transient(Service::Completion, "empty response from model"))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn classify_openai_error(err: OpenAIError) -> TldwError {
    match err {
        OpenAIError::ApiError(api) => {
            classify_api_error(api.code.as_deref(), api.r#type.as_deref(), api.message)
        }
        OpenAIError::Reqwest(e) => TldwError::transient(Service::Completion, e.to_string()),
        OpenAIError::JSONDeserialize(e) => {
            TldwError::transient(Service::Completion, format!("unreadable response: {}", e))
        }
        other => TldwError::ProviderRejected(other.to_string()),
    }
}

/// Map an API error body onto the error taxonomy.
fn classify_api_error(code: Option<&str>, kind: Option<&str>, message: String) -> TldwError {
    let code = code.unwrap_or_default();
    let kind = kind.unwrap_or_default();

    if matches!(code, "invalid_api_key" | "invalid_authentication" | "account_deactivated")
        || kind == "authentication_error"
        || message.contains("Incorrect API key")
    {
        return TldwError::Authentication(message);
    }

    if matches!(code, "insufficient_quota" | "rate_limit_exceeded" | "billing_hard_limit_reached")
        || matches!(kind, "insufficient_quota" | "rate_limit_error" | "requests" | "tokens")
    {
        return TldwError::QuotaExceeded(message);
    }

    if matches!(code, "server_error") || matches!(kind, "server_error" | "api_error") {
        return TldwError::transient(Service::Completion, message);
    }

    TldwError::ProviderRejected(message)
}
