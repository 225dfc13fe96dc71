//! Context store routes: retrieval, listing, status workflow, deletion, and
//! aggregate stats over everything the agent has stored.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use briefclaw_core::context::{ContextStatus, MemoryContext};

use crate::{api_error, ApiError, SharedState};

const DEFAULT_LIST_LIMIT: usize = 10;

pub fn memory_router() -> Router<SharedState> {
    Router::new()
        .route("/memory", get(list_contexts_handler))
        .route(
            "/memory/{context_id}",
            get(get_context_handler).delete(delete_context_handler),
        )
        .route(
            "/memory/{context_id}/status",
            axum::routing::put(update_status_handler),
        )
        .route("/agent/stats", get(stats_handler))
}

async fn get_context_handler(
    State(state): State<SharedState>,
    Path(context_id): Path<String>,
) -> Result<Json<MemoryContext>, ApiError> {
    match state.agent.store().get(&context_id).await {
        Some(context) => Ok(Json(context)),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Context {context_id} not found"),
        )),
    }
}

#[derive(Deserialize)]
struct ListQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct ContextSummary {
    context_id: String,
    agent_role: String,
    status: ContextStatus,
    created_at: String,
    campaign_info: CampaignInfo,
}

#[derive(Serialize)]
struct CampaignInfo {
    campaign_id: Option<serde_json::Value>,
    company_name: Option<serde_json::Value>,
    campaign_type: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ListResponse {
    total_contexts: usize,
    contexts: Vec<ContextSummary>,
}

fn summarize(context: MemoryContext) -> ContextSummary {
    ContextSummary {
        campaign_info: CampaignInfo {
            campaign_id: context.input_data.get("campaign_id").cloned(),
            company_name: context.input_data.get("company_name").cloned(),
            campaign_type: context.input_data.get("campaign_type").cloned(),
        },
        context_id: context.context_id,
        agent_role: context.agent_role,
        status: context.status,
        created_at: context.created_at.to_rfc3339(),
    }
}

/// List context summaries, most recently stored first. `total_contexts` is
/// the store-wide count, not the page size.
async fn list_contexts_handler(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse> {
    let store = state.agent.store();
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let contexts = store.list(limit).await;

    Json(ListResponse {
        total_contexts: store.count().await,
        contexts: contexts.into_iter().map(summarize).collect(),
    })
}

#[derive(Deserialize)]
struct StatusUpdateRequest {
    new_status: String,
}

#[derive(Serialize)]
struct StatusUpdateResponse {
    status: &'static str,
    context_id: String,
    new_status: ContextStatus,
}

/// Advance a context's workflow status. Only the open workflow statuses are
/// accepted here; archived contexts can exist in the store but cannot be
/// reached through this endpoint.
async fn update_status_handler(
    State(state): State<SharedState>,
    Path(context_id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, ApiError> {
    let status: ContextStatus = request
        .new_status
        .parse()
        .ok()
        .filter(|s| ContextStatus::UPDATABLE.contains(s))
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!(
                    "Invalid status '{}'. Must be one of: {}",
                    request.new_status,
                    ContextStatus::UPDATABLE
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )
        })?;

    if !state.agent.store().update_status(&context_id, status).await {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Context {context_id} not found"),
        ));
    }

    Ok(Json(StatusUpdateResponse {
        status: "success",
        context_id,
        new_status: status,
    }))
}

#[derive(Serialize)]
struct DeleteResponse {
    status: &'static str,
    message: String,
}

async fn delete_context_handler(
    State(state): State<SharedState>,
    Path(context_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !state.agent.store().delete(&context_id).await {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Context {context_id} not found"),
        ));
    }
    Ok(Json(DeleteResponse {
        status: "success",
        message: format!("Context {context_id} deleted"),
    }))
}

#[derive(Serialize)]
struct StatsResponse {
    agent_role: String,
    total_contexts: usize,
    status_breakdown: BTreeMap<String, usize>,
    campaign_types: BTreeMap<String, usize>,
    memory_store_health: &'static str,
}

/// Aggregate counts by status and campaign type across all stored contexts.
async fn stats_handler(State(state): State<SharedState>) -> Json<StatsResponse> {
    let contexts = state.agent.store().all().await;

    let mut status_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut campaign_types: BTreeMap<String, usize> = BTreeMap::new();
    for context in &contexts {
        *status_breakdown
            .entry(context.status.to_string())
            .or_default() += 1;
        let campaign_type = context
            .input_data
            .get("campaign_type")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        *campaign_types.entry(campaign_type.to_string()).or_default() += 1;
    }

    Json(StatsResponse {
        agent_role: state.agent.agent_role().to_string(),
        total_contexts: contexts.len(),
        status_breakdown,
        campaign_types,
        memory_store_health: "operational",
    })
}
