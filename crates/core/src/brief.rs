//! The campaign brief — validated input to the whole pipeline.
//!
//! A brief is immutable once received. The only hard validation rule is on
//! `brand_voice` (at least 3 characters after trimming); `campaign_type` has
//! an advisory allow-list that is logged on miss but never rejects.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ValidationError;

/// Campaign types the brief form suggests. Free-form values are accepted,
/// but a miss is logged so unusual briefs stand out in the traces.
pub const KNOWN_CAMPAIGN_TYPES: &[&str] = &[
    "product_launch",
    "brand_awareness",
    "lead_generation",
    "conversion",
    "retention",
    "event_promotion",
    "content_marketing",
];

/// A structured campaign brief, typically sourced from Airtable or a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignBrief {
    /// Unique campaign identifier
    pub campaign_id: String,

    /// Name of the company/client
    pub company_name: String,

    /// Brand name (may differ from company)
    pub brand_name: String,

    /// Type of campaign (e.g., product_launch, awareness, conversion)
    pub campaign_type: String,

    /// Primary campaign objective
    pub objective: String,

    /// Target audience description
    pub target_audience: String,

    /// Core message to communicate
    pub key_message: String,

    /// Brand voice/tone (e.g., professional, casual, playful)
    pub brand_voice: String,

    /// Key brand values to reflect
    pub brand_values: String,

    /// Campaign budget range or amount
    pub budget: String,

    /// Target platforms (social, email, web)
    #[serde(default)]
    pub platforms: Vec<String>,

    /// Campaign deadline (ISO format)
    pub deadline: String,

    /// When the brief was created (ISO format)
    pub created_date: String,

    /// Any additional context or requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,

    /// Airtable record ID if applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airtable_record_id: Option<String>,

    /// Team member assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    /// Campaign priority (high, medium, low)
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    "medium".into()
}

impl CampaignBrief {
    /// Validate the brief and normalize the fields that validation touches.
    ///
    /// `brand_voice` must be at least 3 characters after trimming and is
    /// stored trimmed. `campaign_type` is checked against the advisory
    /// allow-list; unknown values are accepted with a warning.
    pub fn validate(&mut self) -> std::result::Result<(), ValidationError> {
        let voice = self.brand_voice.trim();
        if voice.chars().count() < 3 {
            return Err(ValidationError::InvalidField {
                field: "brand_voice".into(),
                reason: "must be at least 3 characters".into(),
            });
        }
        self.brand_voice = voice.to_string();

        if !KNOWN_CAMPAIGN_TYPES.contains(&self.campaign_type.as_str()) {
            warn!(
                campaign_id = %self.campaign_id,
                campaign_type = %self.campaign_type,
                "Unrecognized campaign type, accepting anyway"
            );
        }

        Ok(())
    }

    /// Serialize the brief as a generic key→value mapping for context storage.
    pub fn to_input_data(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}
