//! Response resolution — the three ways a valid response can be produced.
//!
//! Parse decodes real model output and refuses anything that misses the
//! output contract. Mock synthesizes deterministic assets when no client is
//! configured. Fallback is the last line of defense when a call or parse
//! failed; it never fails itself. All three copy `campaign_id` from the
//! brief, stamp `generated_at`, and leave `context_id` unset.

use briefclaw_core::brief::CampaignBrief;
use briefclaw_core::error::Error;
use briefclaw_core::response::{AgentResponse, EmailCopy};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;

/// The five keys the model is contractually required to return.
const REQUIRED_FIELDS: &[&str] = &[
    "strategy_summary",
    "post_text",
    "email_copy",
    "image_prompt",
    "agent_notes",
];

/// The generated fields as they appear in the model's JSON reply.
#[derive(Debug, Deserialize)]
struct GeneratedFields {
    strategy_summary: String,
    post_text: String,
    email_copy: EmailCopy,
    image_prompt: String,
    agent_notes: String,
}

/// Parse raw model output into a response.
///
/// Returns [`Error::InvalidAgentOutput`] (carrying the raw text) when the
/// reply is not a JSON object, misses a required key, or has a field of the
/// wrong shape. Never silently degrades — converting this into a fallback is
/// the service layer's job.
pub fn parse_response(raw: &str, brief: &CampaignBrief) -> Result<AgentResponse, Error> {
    let value: serde_json::Value = serde_json::from_str(raw.trim()).map_err(|e| {
        error!(error = %e, "Model response was not valid JSON");
        Error::InvalidAgentOutput {
            reason: format!("response was not valid JSON: {e}"),
            raw: raw.to_string(),
        }
    })?;

    let object = value.as_object().ok_or_else(|| Error::InvalidAgentOutput {
        reason: "response was not a JSON object".into(),
        raw: raw.to_string(),
    })?;

    for field in REQUIRED_FIELDS {
        if !object.contains_key(*field) {
            return Err(Error::InvalidAgentOutput {
                reason: format!("missing required field: {field}"),
                raw: raw.to_string(),
            });
        }
    }

    let fields: GeneratedFields =
        serde_json::from_value(value).map_err(|e| Error::InvalidAgentOutput {
            reason: format!("malformed field: {e}"),
            raw: raw.to_string(),
        })?;

    Ok(AgentResponse {
        campaign_id: brief.campaign_id.clone(),
        context_id: None,
        strategy_summary: fields.strategy_summary,
        post_text: fields.post_text,
        email_copy: fields.email_copy,
        image_prompt: fields.image_prompt,
        agent_notes: fields.agent_notes,
        generated_at: Utc::now(),
        confidence_score: None,
    })
}

/// Synthesize a deterministic response from the brief, for development
/// without credentials. Given the same brief twice, only `generated_at`
/// differs.
pub fn mock_response(brief: &CampaignBrief) -> AgentResponse {
    AgentResponse {
        campaign_id: brief.campaign_id.clone(),
        context_id: None,
        strategy_summary: format!(
            "Mock strategy for {}'s {} campaign. This is a placeholder response generated \
             without calling the Anthropic API. The strategy focuses on {} with emphasis on {}.",
            brief.company_name, brief.campaign_type, brief.target_audience, brief.key_message
        ),
        post_text: format!(
            "🚀 Exciting news from {}! {} Perfect for {}. #Innovation #MockPost",
            brief.company_name, brief.key_message, brief.target_audience
        ),
        email_copy: EmailCopy {
            subject_line: format!("Don't Miss This: {}", brief.key_message),
            body_text: format!(
                "Dear Valued Customer,\n\n{}\n\nThis mock email copy is generated for {}'s {} \
                 campaign.\n\nBest regards,\nThe {} Team",
                brief.key_message, brief.company_name, brief.campaign_type, brief.company_name
            ),
        },
        image_prompt: format!(
            "Professional marketing image for {}, showing {}, style: modern and clean, \
             colors: brand colors, mood: {}, target audience: {}",
            brief.company_name, brief.key_message, brief.brand_voice, brief.target_audience
        ),
        agent_notes: format!(
            "MOCK RESPONSE: This is a placeholder response for testing. In production, this \
             would contain the model's strategic insights about the {} campaign for {}.",
            brief.campaign_type, brief.company_name
        ),
        generated_at: Utc::now(),
        confidence_score: None,
    }
}

/// Synthesize a generic response after a failed call or parse. The failure
/// reason is carried verbatim in `agent_notes`. This path never fails.
pub fn fallback_response(brief: &CampaignBrief, error_message: &str) -> AgentResponse {
    AgentResponse {
        campaign_id: brief.campaign_id.clone(),
        context_id: None,
        strategy_summary: format!(
            "Error processing campaign brief. The agent encountered an issue but has generated \
             fallback content for {}'s {} campaign.",
            brief.company_name, brief.campaign_type
        ),
        post_text: format!(
            "Updates coming soon from {}! Stay tuned. #{}",
            brief.company_name, brief.company_name
        ),
        email_copy: EmailCopy {
            subject_line: format!("Important Update from {}", brief.company_name),
            body_text: format!(
                "Hello,\n\nWe're working on something exciting and will share more details \
                 soon.\n\nThank you for your patience.\n\n{} Team",
                brief.company_name
            ),
        },
        image_prompt: format!(
            "Simple, professional image for {}, clean design, brand colors",
            brief.company_name
        ),
        agent_notes: format!(
            "FALLBACK RESPONSE: Agent error - {error_message}. Manual review required."
        ),
        generated_at: Utc::now(),
        confidence_score: None,
    }
}
