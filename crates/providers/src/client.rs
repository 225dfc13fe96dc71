//! The generation capability — available or not, decided once at startup.

use briefclaw_config::AppConfig;
use briefclaw_core::error::ProviderError;
use tracing::info;

use crate::anthropic::AnthropicClient;

/// A two-variant capability around the external model provider.
///
/// Built once at startup from the configured credential. `Unavailable` is a
/// mode (development without credentials), not an error state; callers must
/// branch on [`GenerationClient::is_available`] before attempting a call.
pub enum GenerationClient {
    Available(AnthropicClient),
    Unavailable,
}

impl GenerationClient {
    /// Decide the capability from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        match &config.api_key {
            Some(key) => {
                info!(model = %config.model, "Generation client available");
                GenerationClient::Available(AnthropicClient::new(
                    key.clone(),
                    config.model.clone(),
                    config.max_tokens,
                    config.temperature,
                ))
            }
            None => {
                info!("No API key configured, generation client unavailable (mock mode)");
                GenerationClient::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, GenerationClient::Available(_))
    }

    /// One round trip to the provider. Calling this on an unavailable client
    /// is a caller bug surfaced as `NotConfigured`.
    pub async fn generate(
        &self,
        prompt: &str,
        system: &str,
    ) -> std::result::Result<String, ProviderError> {
        match self {
            GenerationClient::Available(client) => client.generate(prompt, system).await,
            GenerationClient::Unavailable => Err(ProviderError::NotConfigured(
                "No API key configured".into(),
            )),
        }
    }
}
