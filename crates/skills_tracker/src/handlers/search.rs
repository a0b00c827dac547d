//! GET /search - entries matching at least one of the given tags.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use skills_tracker_core::skills::{tag_keys, unique_entry_ids, SearchQuery};

use super::error::error_response;
use super::response::{ApiResponse, SearchResults};
use crate::{handlers::AppError, state::AppState};

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let Some(raw) = query.tags else {
        return Ok(error_response(StatusCode::BAD_REQUEST, "Bad Request"));
    };

    let keys = tag_keys(&raw);
    if keys.is_empty() {
        return Ok(error_response(StatusCode::BAD_REQUEST, "Bad Request"));
    }

    let tags = state.tag_repo.get_tags(&keys).await?;
    if tags.is_empty() {
        return Ok(Json(ApiResponse::new("No matches found", Vec::<()>::new())).into_response());
    }

    let entry_ids = unique_entry_ids(&tags);
    if entry_ids.is_empty() {
        return Ok(error_response(StatusCode::NOT_FOUND, "No entries found"));
    }

    let entries = state.entry_repo.get_entry_summaries(&entry_ids).await?;

    tracing::debug!(
        tags = keys.len(),
        matched_tags = tags.len(),
        entries = entries.len(),
        "Search complete"
    );

    Ok(Json(ApiResponse::new(
        format!(
            "Found {} results matching at least one of the tags provided",
            entries.len()
        ),
        SearchResults { tags, entries },
    ))
    .into_response())
}
