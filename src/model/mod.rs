use serde::{Deserialize, Serialize};

/// Existing discussion as seen by duplicate detection. `title` is the post's
/// display title, `movie_title` the movie it discusses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub movie_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCandidate {
    pub post: PostSummary,
    pub distance: usize,
}

#[derive(Debug, Serialize)]
pub struct PostOut {
    pub id: i64,
    pub title: String,
    pub movie_title: String,
    pub content: String,
    pub trailer_url: Option<String>,
    pub image_url: Option<String>,
    pub user_id: Option<String>,
    pub upvotes: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePostOut {
    pub post: PostOut,
    pub duplicate_warning: Option<DuplicateCandidate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostSort {
    #[default]
    CreatedAt,
    Upvotes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostListQuery {
    pub sort: PostSort,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DuplicateCheckQuery {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewPostPayload {
    pub title: Option<String>,
    pub movie_title: String,
    pub content: String,
    pub trailer_url: Option<String>,
    pub image_url: Option<String>,
    pub user_id: Option<uuid::Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults_to_newest() {
        let query: PostListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.sort, PostSort::CreatedAt);
        assert!(query.q.is_none());

        let query: PostListQuery = serde_json::from_str(r#"{"sort":"upvotes"}"#).unwrap();
        assert_eq!(query.sort, PostSort::Upvotes);
    }

    #[test]
    fn candidate_serializes_nested_post() {
        let candidate = DuplicateCandidate {
            post: PostSummary {
                id: 7,
                title: "Dune: Part Two - First Impressions".into(),
                movie_title: "Dune: Part Two".into(),
            },
            distance: 0,
        };
        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["post"]["id"], 7);
        assert_eq!(value["post"]["movie_title"], "Dune: Part Two");
        assert_eq!(value["distance"], 0);
    }
}
