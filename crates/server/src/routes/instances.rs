use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use service::InstanceRecord;
use tracing::{info, warn};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub id: Option<String>,
}

/// `POST /phone-home`: apply a create/delete event and echo the applied record.
///
/// The body is decoded as JSON whatever `Content-Type` the agent sends.
pub async fn phone_home(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<InstanceRecord>, ApiError> {
    let event: InstanceRecord = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejected phone-home payload");
        ApiError::MalformedRequest(e.to_string())
    })?;
    if event.id.is_empty() {
        return Err(ApiError::MalformedRequest("id must not be empty".into()));
    }
    let applied = state.registry.apply(event).await?;
    Ok(Json(applied))
}

/// `GET /instance-status?id=<id>`
pub async fn instance_status(
    State(state): State<AppState>,
    Query(q): Query<StatusQuery>,
) -> Result<Json<InstanceRecord>, ApiError> {
    let id = q.id.filter(|id| !id.is_empty()).ok_or(ApiError::MissingParameter("id"))?;
    let rec = state.registry.lookup(&id).await?;
    info!(%id, event = %rec.event_name, "queried instance status");
    Ok(Json(rec))
}

/// `GET /list-ids`
pub async fn list_ids(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let ids = state.registry.enumerate().await?;
    info!(count = ids.len(), "listed instance ids");
    Ok(Json(ids))
}
