//! Response envelope shared by the JSON endpoints.

use serde::Serialize;

use skills_tracker_core::skills::{EntrySummary, ReconcileReport, Tag, TagSummary};

/// `{ "message": ..., "data": ... }`, with `data` left out when absent.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// Body of a successful `POST /createEntry`.
#[derive(Debug, Serialize)]
pub struct CreatedEntry {
    pub id: String,
    pub tags: ReconcileReport,
}

/// One page of `GET /tags`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsPage {
    pub items: Vec<TagSummary>,
    pub has_more: bool,
    pub count: usize,
    pub next_cursor: Option<String>,
}

/// Matches of `GET /search`.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub tags: Vec<Tag>,
    pub entries: Vec<EntrySummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::message("Not Found")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Not Found" }));
    }

    #[test]
    fn test_tags_page_uses_camel_case() {
        let page = TagsPage {
            items: vec![],
            has_more: true,
            count: 7,
            next_cursor: Some("rust".to_string()),
        };

        let body = serde_json::to_value(ApiResponse::new("Found 0 tags.", page)).unwrap();

        assert_eq!(body["data"]["hasMore"], true);
        assert_eq!(body["data"]["nextCursor"], "rust");
        assert_eq!(body["data"]["count"], 7);
    }
}
