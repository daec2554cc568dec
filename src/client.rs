use async_openai::Client;
use async_openai::config::OpenAIConfig;

/// Create a client for the OpenAI-compatible endpoint at `api_url`
pub fn create_client(api_url: &str, api_key: &str) -> Client<OpenAIConfig> {
    let openai_config = OpenAIConfig::new()
        .with_api_base(api_url.to_string())
        .with_api_key(api_key.to_string());

    Client::with_config(openai_config)
}
