use super::{AppState, BAD_REQUEST, INTERNAL_SERVER_ERROR, ResponseBody, ok_response};
use crate::comment_filter::{self, Filter, FilterRelationship};
use crate::top_posts;
use crate::upstream::Upstream;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};

// ============================================================================
// Request body
// ============================================================================

#[derive(Debug, Deserialize)]
struct FilteredCommentsRequest {
    /// A missing `filters` key reads as an empty list, which filters down to
    /// nothing.
    #[serde(default)]
    filters: Vec<Filter>,
    #[serde(rename = "filterRelationship", default)]
    filter_relationship: FilterRelationship,
}

// ============================================================================
// Route handlers
// ============================================================================

/// GET /top-posts
///
/// Fetches the full post and comment collections and returns every post
/// ranked by descending comment count.
pub(super) async fn top_posts<U: Upstream>(state: &Arc<AppState<U>>) -> ResponseBody {
    let fetched = tokio::try_join!(state.upstream.fetch_posts(), state.upstream.fetch_comments());

    let (posts, comments) = match fetched {
        Ok(collections) => collections,
        Err(err) => {
            error!(error = %err, "failed to fetch collections from upstream");
            return INTERNAL_SERVER_ERROR;
        }
    };

    let ranked = top_posts::rank_posts_by_comments(&posts, &comments);

    ok_response(&ranked)
}

/// POST /filtered-comments
///
/// Decodes the filter request, fetches the full comment collection and
/// returns the matching subset. Validation failures carry the specific
/// message in the envelope's `error` field.
pub(super) async fn filtered_comments<U: Upstream>(
    state: &Arc<AppState<U>>,
    body: Option<&str>,
) -> ResponseBody {
    let Some(body) = body else {
        return BAD_REQUEST;
    };

    let request: FilteredCommentsRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "failed to decode filter request");
            return BAD_REQUEST;
        }
    };

    let comments = match state.upstream.fetch_comments().await {
        Ok(comments) => comments,
        Err(err) => {
            error!(error = %err, "failed to fetch comments from upstream");
            return INTERNAL_SERVER_ERROR;
        }
    };

    match comment_filter::filter_comments(
        &comments,
        &request.filters,
        request.filter_relationship,
    ) {
        Ok(matched) => ok_response(&matched),
        Err(err) => BAD_REQUEST.with_error(err.to_string()),
    }
}
