//! HTTP API gateway for BriefClaw.
//!
//! Exposes the campaign-processing pipeline and the context store over REST:
//!
//! - `GET  /`                    — liveness, role label + current time
//! - `POST /campaign/process`    — process a brief, get generated assets
//! - `POST /mock/brief`          — stamp a mock brief from a keyed template
//! - `GET  /memory/{id}`         — fetch one stored context
//! - `GET  /memory?limit=N`      — list context summaries
//! - `PUT  /memory/{id}/status`  — advance the workflow status
//! - `DELETE /memory/{id}`       — remove a context
//! - `GET  /agent/stats`         — aggregate counts by status and type
//!
//! Built on Axum. CORS is wide open (the original served a browser frontend
//! from arbitrary origins); there is no authentication by design.

pub mod memory_api;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use briefclaw_agent::CampaignAgent;
use briefclaw_core::brief::CampaignBrief;
use briefclaw_core::error::Error;
use briefclaw_core::response::AgentResponse;
use briefclaw_memory::AgentMemoryStore;
use briefclaw_providers::GenerationClient;

/// Mock brief templates, keyed by campaign type. A versionable JSON asset
/// embedded at compile time.
const MOCK_TEMPLATES: &str = include_str!("../assets/mock_briefs.json");

const DEFAULT_TEMPLATE_KEY: &str = "product_launch";

/// Shared application state for the gateway.
pub struct GatewayState {
    pub agent: CampaignAgent,
}

pub type SharedState = Arc<GatewayState>;

/// Error body shape shared by all handlers.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/campaign/process", post(process_campaign_handler))
        .route("/mock/brief", post(mock_brief_handler))
        .merge(memory_api::memory_router())
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start(config: briefclaw_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let client = GenerationClient::from_config(&config);
    let store = AgentMemoryStore::new();
    let agent = CampaignAgent::new(client, store, &config);

    let state = Arc::new(GatewayState { agent });
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct RootResponse {
    message: &'static str,
    agent_role: String,
    timestamp: String,
}

async fn root_handler(State(state): State<SharedState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "BriefClaw campaign agent is running",
        agent_role: state.agent.agent_role().to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Process a campaign brief and return the generated assets.
///
/// Validation failures are 400s; the generation path itself always resolves
/// to a well-formed response (fallback wins over a 500). Residual internal
/// failures return 500 with the error text inlined.
async fn process_campaign_handler(
    State(state): State<SharedState>,
    Json(brief): Json<CampaignBrief>,
) -> Result<Json<AgentResponse>, ApiError> {
    match state.agent.process_campaign_brief(brief).await {
        Ok(response) => Ok(Json(response)),
        Err(Error::Validation(e)) => Err(api_error(StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => {
            error!(error = %e, "Campaign processing failed");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Agent processing failed: {e}"),
            ))
        }
    }
}

#[derive(Deserialize)]
struct MockBriefRequest {
    campaign_type: String,
    #[serde(default)]
    company_name: Option<String>,
}

#[derive(Serialize)]
struct MockBriefResponse {
    status: &'static str,
    brief: serde_json::Value,
}

/// Stamp a fresh pseudo-brief from a keyed template, for client-side testing.
/// The deadline is computed with calendar-safe date arithmetic (now + 14
/// days), so month-end briefs don't overflow.
async fn mock_brief_handler(
    Json(request): Json<MockBriefRequest>,
) -> Result<Json<MockBriefResponse>, ApiError> {
    let templates: serde_json::Value =
        serde_json::from_str(MOCK_TEMPLATES).map_err(|e| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Mock brief creation failed: {e}"),
            )
        })?;

    let mut template = templates
        .get(&request.campaign_type)
        .or_else(|| templates.get(DEFAULT_TEMPLATE_KEY))
        .cloned()
        .ok_or_else(|| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Mock brief creation failed: no templates available",
            )
        })?;

    if let Some(company) = &request.company_name {
        template["company_name"] = company.clone().into();
        template["brand_name"] = company.clone().into();
    }

    let now = Utc::now();
    template["campaign_id"] = format!("mock_{}", now.format("%Y%m%d_%H%M%S")).into();
    template["created_date"] = now.to_rfc3339().into();
    template["deadline"] = (now + Duration::days(14)).to_rfc3339().into();

    Ok(Json(MockBriefResponse {
        status: "success",
        brief: template,
    }))
}
