use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::PostSort;

#[derive(Debug, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub movie_title: String,
    pub content: String,
    pub trailer_url: Option<String>,
    pub image_url: Option<String>,
    pub user_id: Option<Uuid>,
    pub upvotes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub movie_title: String,
    pub content: String,
    pub trailer_url: Option<String>,
    pub image_url: Option<String>,
    pub user_id: Option<Uuid>,
}

pub async fn list_posts(pool: &PgPool, sort: PostSort) -> Result<Vec<PostRow>, sqlx::Error> {
    let order_by = match sort {
        PostSort::CreatedAt => "created_at DESC",
        PostSort::Upvotes => "upvotes DESC, created_at DESC",
    };

    let sql = format!(
        r#"
        SELECT id,
               title,
               movie_title,
               content,
               trailer_url,
               image_url,
               user_id,
               upvotes,
               created_at,
               updated_at
        FROM hype.posts
        ORDER BY {order_by}
        "#
    );

    sqlx::query_as::<_, PostRow>(&sql).fetch_all(pool).await
}

/// Case-insensitive substring search over title, movie title and content,
/// newest first.
pub async fn search_posts(pool: &PgPool, query: &str) -> Result<Vec<PostRow>, sqlx::Error> {
    let pattern = format!("%{}%", escape_like(query));

    sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id,
               title,
               movie_title,
               content,
               trailer_url,
               image_url,
               user_id,
               upvotes,
               created_at,
               updated_at
        FROM hype.posts
        WHERE title ILIKE $1
           OR movie_title ILIKE $1
           OR content ILIKE $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(pattern)
    .fetch_all(pool)
    .await
}

pub async fn get_post(pool: &PgPool, id: i64) -> Result<Option<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id,
               title,
               movie_title,
               content,
               trailer_url,
               image_url,
               user_id,
               upvotes,
               created_at,
               updated_at
        FROM hype.posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_post(pool: &PgPool, post: NewPost) -> Result<PostRow, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO hype.posts (
            title,
            movie_title,
            content,
            trailer_url,
            image_url,
            user_id,
            upvotes
        )
        VALUES ($1, $2, $3, $4, $5, $6, 0)
        RETURNING id,
                  title,
                  movie_title,
                  content,
                  trailer_url,
                  image_url,
                  user_id,
                  upvotes,
                  created_at,
                  updated_at
        "#,
    )
    .bind(post.title)
    .bind(post.movie_title)
    .bind(post.content)
    .bind(post.trailer_url)
    .bind(post.image_url)
    .bind(post.user_id)
    .fetch_one(pool)
    .await
}

pub async fn increment_upvotes(pool: &PgPool, id: i64) -> Result<Option<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE hype.posts
        SET upvotes = upvotes + 1,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id,
                  title,
                  movie_title,
                  content,
                  trailer_url,
                  image_url,
                  user_id,
                  upvotes,
                  created_at,
                  updated_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
