//! `briefclaw gateway` — Start the HTTP API server.

use briefclaw_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🦀 BriefClaw Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "   Mode:      {}",
        if config.has_api_key() { "live" } else { "mock (no API key)" }
    );

    briefclaw_gateway::start(config).await?;

    Ok(())
}
