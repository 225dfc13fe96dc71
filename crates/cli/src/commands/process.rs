//! `briefclaw process` — Process a campaign brief from a JSON file.

use briefclaw_agent::CampaignAgent;
use briefclaw_config::AppConfig;
use briefclaw_core::brief::CampaignBrief;
use briefclaw_memory::AgentMemoryStore;
use briefclaw_providers::GenerationClient;
use std::path::Path;

pub async fn run(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read brief file {}: {e}", file.display()))?;
    let brief: CampaignBrief = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse brief file {}: {e}", file.display()))?;

    let client = GenerationClient::from_config(&config);
    if !client.is_available() {
        eprintln!("No API key configured — generating a mock response");
    }
    let agent = CampaignAgent::new(client, AgentMemoryStore::new(), &config);

    let response = agent.process_campaign_brief(brief).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
