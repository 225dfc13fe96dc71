//! Audit log — one human-readable markdown block per processed brief.
//!
//! Appended to a monthly `agent_logs_YYYYMM.md` file. The write is a
//! best-effort side effect: failures are logged at warn and never fail the
//! primary response path. The file is not machine-parsed back in.

use briefclaw_core::brief::CampaignBrief;
use chrono::Utc;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Writes audit blocks for processed briefs.
pub struct AuditLog {
    enabled: bool,
    dir: PathBuf,
}

impl AuditLog {
    pub fn new(enabled: bool, dir: PathBuf) -> Self {
        Self { enabled, dir }
    }

    /// A disabled log that records nothing.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            dir: PathBuf::new(),
        }
    }

    /// Append one block for a processed brief. Never returns an error.
    pub async fn record(&self, brief: &CampaignBrief, strategy: &str, model: &str) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.try_record(brief, strategy, model).await {
            warn!(error = %e, campaign_id = %brief.campaign_id, "Failed to write audit log");
        }
    }

    async fn try_record(
        &self,
        brief: &CampaignBrief,
        strategy: &str,
        model: &str,
    ) -> std::io::Result<()> {
        let now = Utc::now();
        let path = self.dir.join(format!("agent_logs_{}.md", now.format("%Y%m")));

        let block = format!(
            "\n## Campaign Processing Log\n\
             **Timestamp:** {timestamp}\n\
             **Campaign ID:** {campaign_id}\n\
             **Company:** {company}\n\
             **Type:** {campaign_type}\n\
             **Strategy:** {strategy}\n\
             **Model:** {model}\n\
             ---\n\n",
            timestamp = now.to_rfc3339(),
            campaign_id = brief.campaign_id,
            company = brief.company_name,
            campaign_type = brief.campaign_type,
            strategy = strategy,
            model = model,
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(block.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
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

    #[tokio::test]
    async fn writes_markdown_block() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(true, dir.path().to_path_buf());
        log.record(&sample_brief(), "mock", "claude-3-sonnet-20241022")
            .await;

        let expected = dir
            .path()
            .join(format!("agent_logs_{}.md", Utc::now().format("%Y%m")));
        let content = std::fs::read_to_string(expected).unwrap();
        assert!(content.contains("## Campaign Processing Log"));
        assert!(content.contains("CAMP_2024_001"));
        assert!(content.contains("TechStart Inc"));
        assert!(content.contains("**Strategy:** mock"));
    }

    #[tokio::test]
    async fn appends_across_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(true, dir.path().to_path_buf());
        log.record(&sample_brief(), "mock", "m").await;
        log.record(&sample_brief(), "parse", "m").await;

        let path = dir
            .path()
            .join(format!("agent_logs_{}.md", Utc::now().format("%Y%m")));
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.matches("## Campaign Processing Log").count(), 2);
    }

    #[tokio::test]
    async fn unwritable_dir_does_not_panic() {
        let log = AuditLog::new(true, PathBuf::from("/nonexistent/audit/dir"));
        log.record(&sample_brief(), "mock", "m").await;
    }

    #[tokio::test]
    async fn disabled_log_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(false, dir.path().to_path_buf());
        log.record(&sample_brief(), "mock", "m").await;
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
