use axum::{extract::State, Json};

use crate::{
    api::extract::{ApiJson, ApiPath, ApiQuery},
    app::AppState,
    error::AppResult,
    model::{CreatePostOut, NewPostPayload, PostListQuery, PostOut},
    service,
};

pub async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PostListQuery>,
) -> AppResult<Json<Vec<PostOut>>> {
    let posts = service::posts::list(&state.pool, query).await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<PostOut>> {
    let post = service::posts::get(&state.pool, id).await?;
    Ok(Json(post))
}

pub async fn create_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewPostPayload>,
) -> AppResult<Json<CreatePostOut>> {
    let created = service::posts::create(
        &state.pool,
        &state.duplicates,
        state.duplicates_config.search_timeout(),
        payload,
    )
    .await?;
    Ok(Json(created))
}

pub async fn upvote_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<PostOut>> {
    let post = service::posts::upvote(&state.pool, id).await?;
    Ok(Json(post))
}
