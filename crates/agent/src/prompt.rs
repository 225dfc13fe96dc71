//! Prompt construction — one text block per brief plus a fixed system
//! instruction describing the required output shape.
//!
//! User-supplied fields are interpolated verbatim, without truncation or
//! escaping. If injected content conflicts with the system instruction the
//! downstream model decides what happens; this component does not police it.

use briefclaw_core::brief::CampaignBrief;

/// The fixed system instruction paired with every generation call.
///
/// It specifies the analysis procedure, the exact output keys (`context_id`
/// is NOT requested — it is assigned after storage), formatting guidance, and
/// the JSON-only requirement.
pub const SYSTEM_PROMPT: &str = "\
You are an expert Campaign Manager AI agent. Your role is to analyze campaign briefs and generate comprehensive marketing assets.

When given a campaign brief, you must:

1. **Analyze the brief thoroughly** - understand the target audience, goals, brand voice, and constraints
2. **Generate a strategic summary** - key insights and approach
3. **Create a social media post** - engaging, platform-appropriate content
4. **Write email copy** - compelling subject line and body text
5. **Generate an image prompt** - detailed prompt for visual asset creation
6. **Provide agent notes** - your reasoning and recommendations

**Output Format Requirements:**
Always respond with a valid JSON object containing these exact fields:
- strategy_summary: String with 2-3 paragraphs of strategic insights
- post_text: String with social media post (include relevant hashtags)
- email_copy: Object with \"subject_line\" and \"body_text\" fields
- image_prompt: String with detailed visual description for image generation
- agent_notes: String with your reasoning, recommendations, and next steps

**Guidelines:**
- Match the brand voice and tone specified in the brief
- Consider the target audience demographics and preferences
- Ensure all content aligns with campaign objectives
- Be specific and actionable in your recommendations
- Keep social posts under 280 characters unless specified otherwise
- Make email copy compelling and conversion-focused
- Create detailed image prompts that capture brand aesthetics

**Response must be valid JSON only - no additional text or formatting.**";

/// Build the user message enumerating the brief fields in fixed order.
pub fn build_user_message(brief: &CampaignBrief) -> String {
    let platforms = if brief.platforms.is_empty() {
        "Multi-platform".to_string()
    } else {
        brief.platforms.join(", ")
    };

    let notes = brief
        .additional_notes
        .as_deref()
        .unwrap_or("No additional notes provided");

    format!(
        "\
CAMPAIGN BRIEF ANALYSIS REQUEST

Campaign ID: {campaign_id}
Company: {company_name}
Brand: {brand_name}
Campaign Type: {campaign_type}

CAMPAIGN DETAILS:
Objective: {objective}
Target Audience: {target_audience}
Key Message: {key_message}

BRAND GUIDELINES:
Brand Voice: {brand_voice}
Brand Values: {brand_values}

DELIVERABLES NEEDED:
- Strategy Summary
- Social Media Post
- Email Campaign Copy
- Image Generation Prompt

CONSTRAINTS:
Budget: {budget}
Timeline: Campaign created {created_date}, deadline {deadline}
Platform Focus: {platforms}

ADDITIONAL CONTEXT:
{notes}

Please analyze this brief and generate comprehensive marketing assets following the specified JSON format.",
        campaign_id = brief.campaign_id,
        company_name = brief.company_name,
        brand_name = brief.brand_name,
        campaign_type = brief.campaign_type,
        objective = brief.objective,
        target_audience = brief.target_audience,
        key_message = brief.key_message,
        brand_voice = brief.brand_voice,
        brand_values = brief.brand_values,
        budget = brief.budget,
        created_date = brief.created_date,
        deadline = brief.deadline,
        platforms = platforms,
        notes = notes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_brief() -> CampaignBrief {
        serde_json::from_value(serde_json::json!({
            "campaign_id": "CAMP_2024_001",
            "company_name": "TechStart Inc",
            "brand_name": "TechStart",
            "campaign_type": "product_launch",
            "objective": "Launch new SaaS product",
            "target_audience": "Developers",
            "key_message": "Save 50% of coding time",
            "brand_voice": "professional",
            "brand_values": "Innovation",
            "budget": "$50,000",
            "platforms": ["LinkedIn", "Twitter"],
            "deadline": "2024-12-15T23:59:59Z",
            "created_date": "2024-11-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn message_enumerates_brief_fields_in_order() {
        let message = build_user_message(&sample_brief());
        let positions: Vec<usize> = [
            "Campaign ID: CAMP_2024_001",
            "Company: TechStart Inc",
            "Brand: TechStart",
            "Campaign Type: product_launch",
            "Objective: Launch new SaaS product",
            "Target Audience: Developers",
            "Key Message: Save 50% of coding time",
            "Brand Voice: professional",
            "Brand Values: Innovation",
            "Budget: $50,000",
            "Platform Focus: LinkedIn, Twitter",
        ]
        .iter()
        .map(|needle| message.find(needle).expect(needle))
        .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn empty_platforms_become_multi_platform() {
        let mut brief = sample_brief();
        brief.platforms.clear();
        let message = build_user_message(&brief);
        assert!(message.contains("Platform Focus: Multi-platform"));
    }

    #[test]
    fn absent_notes_get_placeholder() {
        let brief = sample_brief();
        let message = build_user_message(&brief);
        assert!(message.contains("No additional notes provided"));
    }

    #[test]
    fn notes_are_interpolated_verbatim() {
        let mut brief = sample_brief();
        brief.additional_notes = Some("Focus on developer pain points".into());
        let message = build_user_message(&brief);
        assert!(message.contains("Focus on developer pain points"));
        assert!(!message.contains("No additional notes provided"));
    }

    #[test]
    fn system_prompt_names_the_five_keys_and_not_context_id() {
        for key in [
            "strategy_summary",
            "post_text",
            "email_copy",
            "image_prompt",
            "agent_notes",
        ] {
            assert!(SYSTEM_PROMPT.contains(key), "missing {key}");
        }
        assert!(!SYSTEM_PROMPT.contains("context_id"));
        assert!(SYSTEM_PROMPT.contains("280 characters"));
        assert!(SYSTEM_PROMPT.contains("valid JSON only"));
    }
}
