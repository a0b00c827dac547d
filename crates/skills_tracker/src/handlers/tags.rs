//! GET /tags - forward-only cursor pagination over the tags table.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

use skills_tracker_core::skills::{resolve_page_size, ListTagsQuery};
use skills_tracker_core::storage::PageRequest;

use super::response::{ApiResponse, TagsPage};
use crate::{handlers::AppError, state::AppState};

/// Lists one page of tags along with the total tag count.
///
/// `after` is the last tag key of the previous page. `before` is accepted
/// and ignored.
pub async fn list_tags(
    State(state): State<AppState>,
    Query(query): Query<ListTagsQuery>,
) -> Result<Response, AppError> {
    let limit = resolve_page_size(query.size.as_deref(), state.config.tags_page_size);
    let mut request = PageRequest::new(limit);
    if let Some(after) = query.after {
        request = request.after(after);
    }

    let (page, count) = tokio::try_join!(
        state.tag_repo.list_tags(&request),
        state.tag_repo.count_tags()
    )?;

    if page.items.is_empty() {
        return Ok(Json(ApiResponse::new("No tags found", Vec::<()>::new())).into_response());
    }

    let has_more = page.has_more();
    let message = format!("Found {} tags.", page.items.len());

    Ok(Json(ApiResponse::new(
        message,
        TagsPage {
            items: page.items,
            has_more,
            count,
            next_cursor: page.next_cursor,
        },
    ))
    .into_response())
}
