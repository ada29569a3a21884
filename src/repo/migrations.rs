use sqlx::{Executor, PgPool};
use tracing::info;

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    tx.execute(
        r#"
        CREATE SCHEMA IF NOT EXISTS hype;
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS hype.posts (
          id              BIGSERIAL PRIMARY KEY,
          title           TEXT NOT NULL,
          movie_title     TEXT NOT NULL,
          content         TEXT NOT NULL,
          trailer_url     TEXT,
          image_url       TEXT,
          user_id         UUID,
          upvotes         INTEGER NOT NULL DEFAULT 0,
          created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
          updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_posts_created_at ON hype.posts(created_at DESC);
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_posts_upvotes ON hype.posts(upvotes DESC);
        "#,
    )
    .await?;

    tx.commit().await?;
    info!("database schema ensured");
    Ok(())
}
