//! `briefclaw status` — Show effective configuration and agent mode.

use briefclaw_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("🦀 BriefClaw Status");
    println!("==================");
    println!("  Agent role:   {}", config.agent_role);
    println!("  Model:        {}", config.model);
    println!("  Max tokens:   {}", config.max_tokens);
    println!("  Temperature:  {}", config.temperature);
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "  Mode:         {}",
        if config.has_api_key() { "live (API key configured)" } else { "mock (no API key)" }
    );
    println!(
        "  Audit log:    {}",
        if config.audit.enabled {
            format!("enabled ({})", config.audit.dir.display())
        } else {
            "disabled".into()
        }
    );

    Ok(())
}
