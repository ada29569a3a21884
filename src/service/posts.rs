use std::time::Duration;

use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    model::{CreatePostOut, NewPostPayload, PostListQuery, PostOut},
    repo::{
        self,
        posts::{NewPost, PostRow},
    },
    service::duplicates::{best_match, check_with_timeout, DuplicateDetector},
    util::title::{generate_post_title, MAX_TITLE_CHARS},
};

pub async fn list(pool: &PgPool, query: PostListQuery) -> AppResult<Vec<PostOut>> {
    let search = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let rows = match search {
        Some(q) => repo::posts::search_posts(pool, q).await?,
        None => repo::posts::list_posts(pool, query.sort).await?,
    };

    tracing::debug!(sort = ?query.sort, q = ?search, count = rows.len(), "posts listed");

    Ok(rows.into_iter().map(post_out).collect())
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<PostOut> {
    repo::posts::get_post(pool, id)
        .await?
        .map(post_out)
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))
}

pub async fn upvote(pool: &PgPool, id: i64) -> AppResult<PostOut> {
    repo::posts::increment_upvotes(pool, id)
        .await?
        .map(post_out)
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))
}

/// Creates a post. The duplicate check runs first and only contributes a
/// warning; it never prevents the insert.
pub async fn create(
    pool: &PgPool,
    detector: &DuplicateDetector<PgPool>,
    duplicate_timeout: Duration,
    payload: NewPostPayload,
) -> AppResult<CreatePostOut> {
    let new_post = prepare_new_post(payload)?;

    let duplicates = check_with_timeout(detector, &new_post.movie_title, duplicate_timeout).await;
    let duplicate_warning = best_match(&duplicates).cloned();

    let row = repo::posts::insert_post(pool, new_post).await?;
    tracing::info!(
        post_id = row.id,
        movie_title = %row.movie_title,
        duplicate_of = ?duplicate_warning.as_ref().map(|c| c.post.id),
        "post created"
    );

    Ok(CreatePostOut {
        post: post_out(row),
        duplicate_warning,
    })
}

fn prepare_new_post(payload: NewPostPayload) -> AppResult<NewPost> {
    let NewPostPayload {
        title,
        movie_title,
        content,
        trailer_url,
        image_url,
        user_id,
    } = payload;

    if content.trim().is_empty() {
        return Err(AppError::BadRequest("content is required".into()));
    }

    let movie_title = movie_title.trim().to_string();
    if movie_title.is_empty() {
        return Err(AppError::BadRequest("movie title is required".into()));
    }
    ensure_title_length(&movie_title, "movie title")?;

    let title = match title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        Some(title) => {
            ensure_title_length(&title, "title")?;
            title
        }
        None => generate_post_title(&movie_title),
    };

    Ok(NewPost {
        title,
        movie_title,
        content,
        trailer_url: non_blank(trailer_url),
        image_url: non_blank(image_url),
        user_id,
    })
}

fn ensure_title_length(value: &str, field: &str) -> AppResult<()> {
    if value.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn post_out(row: PostRow) -> PostOut {
    PostOut {
        id: row.id,
        title: row.title,
        movie_title: row.movie_title,
        content: row.content,
        trailer_url: row.trailer_url,
        image_url: row.image_url,
        user_id: row.user_id.map(|id| id.to_string()),
        upvotes: row.upvotes,
        created_at: row.created_at.to_rfc3339(),
        updated_at: row.updated_at.to_rfc3339(),
    }
}
