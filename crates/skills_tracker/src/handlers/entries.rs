//! Entry handlers: listing and creation.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use skills_tracker_core::skills::{CreateEntryRequest, Entry, ListItemsQuery};

use super::error::error_response;
use super::response::{ApiResponse, CreatedEntry};
use crate::{handlers::AppError, reconcile::reconcile_tags, state::AppState};

const CREATE_FAILED: &str = "Failed to create new entry.";

/// GET /items - every entry, optionally only those of `userId`.
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<ApiResponse<Vec<Entry>>>, AppError> {
    let entries = state
        .entry_repo
        .list_entries(query.user_id.as_deref())
        .await?;

    tracing::debug!(user_id = ?query.user_id, count = entries.len(), "Listed entries");

    Ok(Json(ApiResponse::new(
        format!("{} items.", entries.len()),
        entries,
    )))
}

/// POST /createEntry - stores an entry, then links it to each of its tags.
///
/// Tags are only touched once the entry write succeeded. Tags that could
/// not be linked are listed under `failedTags` in the response.
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected createEntry body");
            return error_response(StatusCode::BAD_REQUEST, CREATE_FAILED);
        }
    };

    let now = Utc::now();
    let prepared = match request.into_entry(Uuid::new_v4().to_string(), now) {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid createEntry request");
            return error_response(StatusCode::BAD_REQUEST, CREATE_FAILED);
        }
    };

    let entry = prepared.entry;
    if let Err(e) = state.entry_repo.create_entry(&entry).await {
        tracing::error!(entry_id = %entry.id, error = %e, "Failed to store entry");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED);
    }

    tracing::info!(entry_id = %entry.id, user_id = %entry.user_id, "Created entry");

    let report = reconcile_tags(state.tag_repo.as_ref(), &prepared.tags, &entry.id, now).await;

    (
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "One item successfully created.",
            CreatedEntry {
                id: entry.id,
                tags: report,
            },
        )),
    )
        .into_response()
}
