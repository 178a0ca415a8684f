pub mod client;
pub mod explainer;

// Public API exports
pub use client::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, ModelConfig, OpenRouterClient,
};
pub use explainer::{
    Explainer, OfflineExplainer, OpenRouterExplainer, explainer_from_config, fallback_explanation,
};
