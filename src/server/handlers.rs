//! API request handlers
//!
//! The health check, the link processing endpoint and the record view.

use axum::{
    extract::{Path, State, rejection::JsonRejection},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::extractor::Article;
use crate::server::AppState;
use crate::server::error::AppError;
use crate::store::{DbError, Record};

/// Body of a link processing request
#[derive(Debug, Deserialize)]
pub struct ProcessLinkRequest {
    /// Page to fetch and store
    pub url: String,
}

/// Plain acknowledgement, optionally carrying the id of a new record
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always "Ok"
    pub message: String,
    /// Id of the record that was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MessageResponse {
    fn ok() -> Self {
        Self {
            message: "Ok".to_string(),
            id: None,
        }
    }
}

/// GET /api/v1/health
pub async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse::ok())
}

/// POST /api/v1/processLink
///
/// Fetches the page, extracts its article and stores it in the configured
/// collection.
#[instrument(skip_all)]
pub async fn process_link(
    State(state): State<AppState>,
    payload: Result<Json<ProcessLinkRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedRequest(e.body_text()))?;
    info!(url = %request.url, "Processing link");

    let article =
        Article::fetch_and_extract(&state.fetcher, &request.url, &state.config.extractor).await?;

    let id = state
        .sink
        .create_record(&state.config.collection, article.into_fields())
        .await?;
    info!(%id, url = %request.url, "Stored article");

    Ok(Json(MessageResponse {
        id: Some(id),
        ..MessageResponse::ok()
    }))
}

/// GET /api/collections/:collection/records/:id
#[instrument(skip(state))]
pub async fn view_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Record>, AppError> {
    state
        .sink
        .get_record(&collection, &id)
        .await
        .map_err(|e| match e {
            DbError::CollectionNotFound(name) => {
                AppError::NotFound(format!("collection {}", name))
            }
            other => AppError::Lookup(other),
        })?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("record {} in {}", id, collection)))
}
