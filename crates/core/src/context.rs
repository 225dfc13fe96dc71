//! Memory contexts — one audit/workflow record per brief-processing call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::brief::CampaignBrief;
use crate::response::AgentResponse;

/// Workflow status of a stored context.
///
/// The public status-update operation only accepts the four workflow states
/// (draft → in_review → approved → published). `Archived` is a valid value for
/// the model and the store, but is not reachable through that operation — a
/// known inconsistency carried over intentionally rather than silently
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextStatus {
    #[default]
    Draft,
    InReview,
    Approved,
    Published,
    Archived,
}

impl ContextStatus {
    /// The values the public status-update operation accepts.
    pub const UPDATABLE: &'static [ContextStatus] = &[
        ContextStatus::Draft,
        ContextStatus::InReview,
        ContextStatus::Approved,
        ContextStatus::Published,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextStatus::Draft => "draft",
            ContextStatus::InReview => "in_review",
            ContextStatus::Approved => "approved",
            ContextStatus::Published => "published",
            ContextStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ContextStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ContextStatus::Draft),
            "in_review" => Ok(ContextStatus::InReview),
            "approved" => Ok(ContextStatus::Approved),
            "published" => Ok(ContextStatus::Published),
            "archived" => Ok(ContextStatus::Archived),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// One interaction in a context's history: what happened, with input and
/// output snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
}

/// A stored agent context: the full audit record for one service invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryContext {
    /// Unique context identifier
    pub context_id: String,

    /// Role of the agent (e.g., Campaign Manager)
    pub agent_role: String,

    /// Original input data (the campaign brief as a generic mapping)
    pub input_data: serde_json::Map<String, serde_json::Value>,

    /// Append-only history of interactions
    #[serde(default)]
    pub conversation_history: Vec<InteractionRecord>,

    /// Latest generated assets for quick access
    #[serde(default)]
    pub output_memory: serde_json::Map<String, serde_json::Value>,

    /// Agent reasoning and decision notes
    #[serde(default)]
    pub reasoning_log: Vec<String>,

    /// Current workflow status
    #[serde(default)]
    pub status: ContextStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Person/team assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    /// Who reviewed this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,

    /// Approval/rejection notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_notes: Option<String>,
}

impl MemoryContext {
    /// Derive the context id for a brief processed at `at`:
    /// `campaign_{campaign_id}_{YYYYMMDD_HHMMSS}`.
    pub fn derive_id(campaign_id: &str, at: DateTime<Utc>) -> String {
        format!("campaign_{}_{}", campaign_id, at.format("%Y%m%d_%H%M%S"))
    }

    /// Assemble the audit record for one successful `process_campaign_brief`
    /// invocation. Status starts at `Draft`.
    pub fn from_invocation(
        context_id: String,
        agent_role: &str,
        brief: &CampaignBrief,
        response: &AgentResponse,
    ) -> Self {
        let now = Utc::now();
        let input = serde_json::to_value(brief).unwrap_or_default();
        let output = serde_json::to_value(response).unwrap_or_default();

        Self {
            context_id,
            agent_role: agent_role.to_string(),
            input_data: brief.to_input_data(),
            conversation_history: vec![InteractionRecord {
                timestamp: now,
                action: "process_campaign".into(),
                input,
                output,
            }],
            output_memory: response.to_output_memory(),
            reasoning_log: vec![response.agent_notes.clone()],
            status: ContextStatus::Draft,
            created_at: now,
            updated_at: now,
            assigned_to: brief.assigned_to.clone(),
            reviewed_by: None,
            approval_notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::EmailCopy;

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

    fn sample_response() -> AgentResponse {
        AgentResponse {
            campaign_id: "CAMP_2024_001".into(),
            context_id: None,
            strategy_summary: "strategy".into(),
            post_text: "post".into(),
            email_copy: EmailCopy {
                subject_line: "subject".into(),
                body_text: "body".into(),
            },
            image_prompt: "image".into(),
            agent_notes: "notes".into(),
            generated_at: Utc::now(),
            confidence_score: None,
        }
    }

    #[test]
    fn status_roundtrips_snake_case() {
        for status in [
            ContextStatus::Draft,
            ContextStatus::InReview,
            ContextStatus::Approved,
            ContextStatus::Published,
            ContextStatus::Archived,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let parsed: ContextStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, status);
            assert_eq!(status.as_str().parse::<ContextStatus>().unwrap(), status);
        }
    }

    #[test]
    fn in_review_uses_snake_case() {
        let json = serde_json::to_string(&ContextStatus::InReview).unwrap();
        assert_eq!(json, "\"in_review\"");
    }

    #[test]
    fn archived_not_in_updatable_set() {
        assert!(!ContextStatus::UPDATABLE.contains(&ContextStatus::Archived));
        assert_eq!(ContextStatus::UPDATABLE.len(), 4);
    }

    #[test]
    fn unknown_status_string_rejected() {
        assert!("deleted".parse::<ContextStatus>().is_err());
    }

    #[test]
    fn derived_id_has_expected_shape() {
        let at = "2024-11-01T14:05:00Z".parse::<DateTime<Utc>>().unwrap();
        let id = MemoryContext::derive_id("CAMP_2024_001", at);
        assert_eq!(id, "campaign_CAMP_2024_001_20241101_140500");
    }

    #[test]
    fn invocation_context_starts_as_draft() {
        let ctx = MemoryContext::from_invocation(
            "ctx_1".into(),
            "Campaign Manager",
            &sample_brief(),
            &sample_response(),
        );
        assert_eq!(ctx.status, ContextStatus::Draft);
        assert_eq!(ctx.agent_role, "Campaign Manager");
        assert_eq!(ctx.conversation_history.len(), 1);
        assert_eq!(ctx.conversation_history[0].action, "process_campaign");
        assert_eq!(ctx.reasoning_log, vec!["notes".to_string()]);
        assert_eq!(ctx.output_memory["latest_post"], "post");
        assert_eq!(ctx.input_data["company_name"], "TechStart Inc");
    }
}
