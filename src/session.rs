use anyhow::{Context, Result};
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};

/// Sampling settings for a chat session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub model: String,
    pub system_instruction: String,
    pub temperature: f32,
    pub top_p: f32,
}

/// Conversational context for one user session
///
/// The hosted API is stateless, so the whole history is replayed on every
/// turn. `reset` starts over from the system instruction.
pub struct ChatSession {
    config: SessionConfig,
    history: Vec<ChatCompletionRequestMessage>,
}

impl ChatSession {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let mut session = Self {
            config,
            history: Vec::new(),
        };
        session.reset()?;
        Ok(session)
    }

    pub fn reset(&mut self) -> Result<()> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(self.config.system_instruction.as_str())
            .build()
            .context("Failed to build system message")?;

        self.history.clear();
        self.history.push(system.into());
        tracing::debug!("Chat session reset");
        Ok(())
    }

    /// Number of user and model turns so far
    pub fn turns(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Send a user message and return the model's reply
    ///
    /// On failure the user message is dropped from the history again so a
    /// retry does not send it twice.
    pub async fn send(&mut self, client: &Client<OpenAIConfig>, message: &str) -> Result<String> {
        self.push_user(message)?;

        match self.request_reply(client).await {
            Ok(reply) => {
                self.push_model(&reply)?;
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    async fn request_reply(&self, client: &Client<OpenAIConfig>) -> Result<String> {
        let request = self.build_request()?;

        let response = client
            .chat()
            .create(request)
            .await
            .context("Chat API call failed")?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("No content generated."))?;

        tracing::info!("Chat reply: {} chars", text.len());
        Ok(text)
    }

    fn build_request(&self) -> Result<CreateChatCompletionRequest> {
        CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(self.history.clone())
            .temperature(self.config.temperature)
            .top_p(self.config.top_p)
            .build()
            .context("Failed to build chat request")
    }

    fn push_user(&mut self, message: &str) -> Result<()> {
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(message)
            .build()
            .context("Failed to build user message")?;
        self.history.push(user.into());
        Ok(())
    }

    fn push_model(&mut self, reply: &str) -> Result<()> {
        let assistant = ChatCompletionRequestAssistantMessageArgs::default()
            .content(reply)
            .build()
            .context("Failed to build assistant message")?;
        self.history.push(assistant.into());
        Ok(())
    }
}
