//! Generated marketing assets — the output contract every strategy satisfies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email campaign copy. Always nested inside an [`AgentResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailCopy {
    /// Email subject line
    pub subject_line: String,

    /// Email body content
    pub body_text: String,
}

/// The response from the campaign agent, containing all generated assets.
///
/// All three generation strategies (parse, mock, fallback) produce this shape.
/// `context_id` is assigned after the context is stored, never at generation
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Campaign ID from the brief
    pub campaign_id: String,

    /// Memory context ID for this response (set after storage)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Strategic overview and approach
    pub strategy_summary: String,

    /// Social media post content
    pub post_text: String,

    /// Email campaign copy
    pub email_copy: EmailCopy,

    /// Detailed prompt for image generation
    pub image_prompt: String,

    /// Agent reasoning and recommendations
    pub agent_notes: String,

    /// When the response was generated
    pub generated_at: DateTime<Utc>,

    /// Agent confidence in the response (0-1). Reserved for future use,
    /// never populated by current logic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl AgentResponse {
    /// The "latest" output fields kept in a context for quick access.
    pub fn to_output_memory(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("latest_strategy".into(), self.strategy_summary.clone().into());
        map.insert("latest_post".into(), self.post_text.clone().into());
        map.insert(
            "latest_email".into(),
            serde_json::to_value(&self.email_copy).unwrap_or_default(),
        );
        map.insert("latest_image_prompt".into(), self.image_prompt.clone().into());
        map
    }
}
