use std::time::Duration;

use crate::ai::client::{ModelConfig, OpenRouterClient, api_key_configured};
use crate::config::AiConfig;

/// Produces a short explanation of a word. Never fails: any problem turns
/// into [`fallback_explanation`].
pub trait Explainer {
    fn explain(&self, word: &str) -> String;

    /// Whether explanations come from a live model.
    fn is_online(&self) -> bool {
        false
    }
}

pub fn fallback_explanation(word: &str) -> String {
    format!(
        "[Offline explanation]\n\nWord: {word}\nThe AI teacher is not available right now, \
         showing the built-in example instead.\nExample: The {word} is very important for learning."
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineExplainer;

impl Explainer for OfflineExplainer {
    fn explain(&self, word: &str) -> String {
        fallback_explanation(word)
    }
}

/// Blocking wrapper around one chat-completion call, bounded by a timeout.
pub struct OpenRouterExplainer {
    client: OpenRouterClient,
    runtime: tokio::runtime::Runtime,
    config: ModelConfig,
    timeout: Duration,
}

impl OpenRouterExplainer {
    pub fn new(config: &AiConfig) -> Result<Self, String> {
        let client = OpenRouterClient::new()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| format!("Failed to start async runtime: {}", e))?;
        Ok(Self {
            client,
            runtime,
            config: config.model_config(),
            timeout: config.timeout(),
        })
    }
}

impl Explainer for OpenRouterExplainer {
    fn explain(&self, word: &str) -> String {
        log::debug!("Requesting explanation for {}", word);
        let result = self.runtime.block_on(async {
            tokio::time::timeout(self.timeout, self.client.explain_word(word, &self.config)).await
        });

        match result {
            Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(Ok(_)) => {
                log::warn!("Empty explanation for {}, using fallback", word);
                fallback_explanation(word)
            }
            Ok(Err(e)) => {
                log::warn!("Explanation for {} failed: {}", word, e);
                fallback_explanation(word)
            }
            Err(_) => {
                log::warn!(
                    "Explanation for {} timed out after {:?}",
                    word,
                    self.timeout
                );
                fallback_explanation(word)
            }
        }
    }

    fn is_online(&self) -> bool {
        true
    }
}

/// Live explainer when AI is enabled and a key is set, offline otherwise.
pub fn explainer_from_config(config: &AiConfig) -> Box<dyn Explainer> {
    if !config.enabled {
        log::info!("AI explanations disabled in config");
        return Box::new(OfflineExplainer);
    }
    if !api_key_configured() {
        log::info!("No API key configured, using offline explanations");
        return Box::new(OfflineExplainer);
    }
    match OpenRouterExplainer::new(config) {
        Ok(explainer) => Box::new(explainer),
        Err(e) => {
            log::warn!("{}", e);
            Box::new(OfflineExplainer)
        }
    }
}
