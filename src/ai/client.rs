use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

/// True when a non-empty API key is present in the environment.
pub fn api_key_configured() -> bool {
    std::env::var(API_KEY_VAR)
        .map(|key| !key.trim().is_empty())
        .unwrap_or(false)
}

fn explanation_prompt(word: &str) -> String {
    format!(
        r#"Explain the English word or phrase below for a Traditional Chinese speaking learner.

Word: {}

- Give a short explanation in Traditional Chinese.
- Then give one simple English example sentence using the word.
- Plain text only, no markdown headings.
"#,
        word
    )
}

impl OpenRouterClient {
    pub fn new() -> Result<Self, String> {
        let client = openrouter_api::OpenRouterClient::quick()
            .map_err(|e| format!("Failed to create OpenRouter client: {}", e))?;

        Ok(Self { client })
    }

    pub async fn explain_word(
        &self,
        word: &str,
        config: &ModelConfig,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let messages = vec![
            Message::text(
                "system",
                "You are an English teacher helping students learn vocabulary. Be brief.",
            ),
            Message::text("user", &explanation_prompt(word)),
        ];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        let response = self
            .client
            .chat()?
            .chat_completion(request)
            .await
            .map_err(|e| format!("OpenRouter API error: {}", e))?;

        if let Some(choice) = response.choices.first() {
            match &choice.message.content {
                openrouter_api::MessageContent::Text(text) => Ok(text.clone()),
                openrouter_api::MessageContent::Parts(parts) => {
                    let text_parts: Vec<String> = parts
                        .iter()
                        .filter_map(|p| {
                            if let openrouter_api::ContentPart::Text(tc) = p {
                                Some(tc.text.clone())
                            } else {
                                None
                            }
                        })
                        .collect();
                    Ok(text_parts.join("\n"))
                }
            }
        } else {
            Err("No response choices received".into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_word() {
        let prompt = explanation_prompt("green thumb");
        assert!(prompt.contains("Word: green thumb"));
        assert!(prompt.contains("Traditional Chinese"));
    }

    #[test]
    fn test_model_config_serializes_without_empty_fields() {
        let config = ModelConfig {
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            max_tokens: Some(10),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("temperature"));
        assert!(json.contains("\"max_tokens\":10"));
    }
}
