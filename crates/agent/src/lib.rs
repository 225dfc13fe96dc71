//! Campaign agent service layer for BriefClaw.
//!
//! Composes prompt builder → generation client → response resolver → context
//! store. The caller-facing contract is that every valid brief yields a
//! well-formed [`AgentResponse`]: generation-path failures (transport errors,
//! malformed model output) are always recovered locally into a clearly
//! labeled fallback response and never surfaced raw.

pub mod audit;
pub mod prompt;
pub mod resolver;

use briefclaw_config::AppConfig;
use briefclaw_core::brief::CampaignBrief;
use briefclaw_core::context::MemoryContext;
use briefclaw_core::error::{Error, Result};
use briefclaw_core::response::AgentResponse;
use briefclaw_memory::AgentMemoryStore;
use briefclaw_providers::GenerationClient;
use chrono::Utc;
use tracing::{info, warn};

pub use audit::AuditLog;

/// The campaign manager agent.
///
/// Explicitly constructed and passed by reference into the gateway, so
/// lifecycle and testability stay explicit (no module-level singleton).
pub struct CampaignAgent {
    client: GenerationClient,
    store: AgentMemoryStore,
    audit: AuditLog,
    agent_role: String,
    model: String,
}

impl CampaignAgent {
    pub fn new(client: GenerationClient, store: AgentMemoryStore, config: &AppConfig) -> Self {
        Self {
            client,
            store,
            audit: AuditLog::new(config.audit.enabled, config.audit.dir.clone()),
            agent_role: config.agent_role.clone(),
            model: config.model.clone(),
        }
    }

    /// The role label the agent reports about itself.
    pub fn agent_role(&self) -> &str {
        &self.agent_role
    }

    /// Whether a live generation client is configured.
    pub fn is_live(&self) -> bool {
        self.client.is_available()
    }

    /// The store this agent writes contexts into.
    pub fn store(&self) -> &AgentMemoryStore {
        &self.store
    }

    /// Process a campaign brief: validate, generate assets via one of the
    /// three resolver strategies, store the audit context, and return the
    /// response with its assigned `context_id`.
    ///
    /// Errors only on brief validation failures or a store failure; the
    /// generation path always resolves to a valid response.
    pub async fn process_campaign_brief(
        &self,
        mut brief: CampaignBrief,
    ) -> Result<AgentResponse> {
        brief.validate()?;

        let (mut response, strategy) = self.generate(&brief).await;
        info!(
            campaign_id = %brief.campaign_id,
            strategy,
            "Campaign brief processed"
        );

        let context_id = MemoryContext::derive_id(&brief.campaign_id, Utc::now());
        let context = MemoryContext::from_invocation(
            context_id.clone(),
            &self.agent_role,
            &brief,
            &response,
        );

        if !self.store.store(&context_id, context).await {
            return Err(Error::Internal(format!(
                "failed to store context {context_id}"
            )));
        }
        response.context_id = Some(context_id);

        // Best-effort side effect; never fails the response path.
        self.audit.record(&brief, strategy, &self.model).await;

        Ok(response)
    }

    /// Select and run one of the three mutually exclusive strategies.
    /// Returns the response and the name of the strategy that fired.
    async fn generate(&self, brief: &CampaignBrief) -> (AgentResponse, &'static str) {
        if !self.client.is_available() {
            info!(campaign_id = %brief.campaign_id, "Using mock response (no API key provided)");
            return (resolver::mock_response(brief), "mock");
        }

        let user_message = prompt::build_user_message(brief);
        match self.client.generate(&user_message, prompt::SYSTEM_PROMPT).await {
            Ok(raw) => match resolver::parse_response(&raw, brief) {
                Ok(response) => (response, "parse"),
                Err(Error::InvalidAgentOutput { reason, raw }) => {
                    warn!(
                        campaign_id = %brief.campaign_id,
                        reason = %reason,
                        raw_len = raw.len(),
                        "Model output failed the output contract, falling back"
                    );
                    (resolver::fallback_response(brief, &reason), "fallback")
                }
                Err(other) => {
                    warn!(
                        campaign_id = %brief.campaign_id,
                        error = %other,
                        "Unexpected parse error, falling back"
                    );
                    (
                        resolver::fallback_response(brief, &other.to_string()),
                        "fallback",
                    )
                }
            },
            Err(e) => {
                warn!(
                    campaign_id = %brief.campaign_id,
                    error = %e,
                    "Generation call failed, falling back"
                );
                (
                    resolver::fallback_response(brief, &e.to_string()),
                    "fallback",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefclaw_core::context::ContextStatus;

    fn sample_brief() -> CampaignBrief {
        serde_json::from_value(serde_json::json!({
            "campaign_id": "CAMP_2024_001",
            "company_name": "TechStart Inc",
            "brand_name": "TechStart",
            "campaign_type": "product_launch",
            "objective": "Launch",
            "target_audience": "Developers",
            "key_message": "Save time",
            "brand_voice": "professional",
            "brand_values": "Innovation",
            "budget": "$50k",
            "deadline": "2024-12-15T23:59:59Z",
            "created_date": "2024-11-01T10:00:00Z"
        }))
        .unwrap()
    }

    fn mock_agent() -> CampaignAgent {
        let config = AppConfig::default();
        CampaignAgent {
            client: GenerationClient::Unavailable,
            store: AgentMemoryStore::new(),
            audit: AuditLog::disabled(),
            agent_role: config.agent_role.clone(),
            model: config.model.clone(),
        }
    }

    #[tokio::test]
    async fn response_copies_campaign_id() {
        let agent = mock_agent();
        let response = agent.process_campaign_brief(sample_brief()).await.unwrap();
        assert_eq!(response.campaign_id, "CAMP_2024_001");
    }

    #[tokio::test]
    async fn context_is_stored_and_linked() {
        let agent = mock_agent();
        let response = agent.process_campaign_brief(sample_brief()).await.unwrap();

        let context_id = response.context_id.expect("context_id assigned");
        assert!(context_id.starts_with("campaign_CAMP_2024_001_"));

        let context = agent.store().get(&context_id).await.unwrap();
        assert_eq!(context.status, ContextStatus::Draft);
        assert_eq!(context.agent_role, "Campaign Manager");
        assert_eq!(context.input_data["campaign_id"], "CAMP_2024_001");
        assert_eq!(context.reasoning_log.len(), 1);
    }

    #[tokio::test]
    async fn mock_strategy_is_deterministic() {
        let agent = mock_agent();
        let a = agent.process_campaign_brief(sample_brief()).await.unwrap();
        let b = agent.process_campaign_brief(sample_brief()).await.unwrap();
        assert_eq!(a.strategy_summary, b.strategy_summary);
        assert_eq!(a.post_text, b.post_text);
        assert_eq!(a.email_copy, b.email_copy);
        assert_eq!(a.image_prompt, b.image_prompt);
        assert_eq!(a.agent_notes, b.agent_notes);
    }

    #[tokio::test]
    async fn invalid_brand_voice_rejected_before_generation() {
        let agent = mock_agent();
        let mut brief = sample_brief();
        brief.brand_voice = "ab".into();

        let err = agent.process_campaign_brief(brief).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(agent.store().count().await, 0);
    }

    #[tokio::test]
    async fn each_invocation_gets_its_own_context() {
        let agent = mock_agent();
        let mut other = sample_brief();
        other.campaign_id = "CAMP_2024_002".into();

        agent.process_campaign_brief(sample_brief()).await.unwrap();
        agent.process_campaign_brief(other).await.unwrap();
        assert_eq!(agent.store().count().await, 2);
    }
}
