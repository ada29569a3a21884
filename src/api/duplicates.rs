use axum::{extract::State, Json};

use crate::{
    api::extract::ApiQuery,
    app::AppState,
    model::{DuplicateCandidate, DuplicateCheckQuery},
    service::duplicates::check_with_timeout,
};

/// Answers 200 for any well-formed query; a missing title or a failed search
/// is an empty list.
pub async fn check_duplicates(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DuplicateCheckQuery>,
) -> Json<Vec<DuplicateCandidate>> {
    let title = query.title.as_deref().unwrap_or_default();
    let candidates = check_with_timeout(
        &state.duplicates,
        title,
        state.duplicates_config.search_timeout(),
    )
    .await;
    Json(candidates)
}
