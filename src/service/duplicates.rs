//! Duplicate-discussion detection for new posts.
//!
//! A candidate movie title is normalized, sent to the post text search, and
//! the loosely matching posts are re-filtered by edit distance between
//! normalized movie titles. The check is advisory: any search failure yields
//! an empty list so post creation is never blocked.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::{
    model::{DuplicateCandidate, PostSummary},
    repo,
    util::{
        similarity::levenshtein_distance,
        title::{normalize_movie_title, MAX_TITLE_CHARS},
    },
};

pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// Free-text post search. Matches loosely on title, movie title or body; the
/// order of results is whatever the backend returns.
#[async_trait]
pub trait PostSearch: Send + Sync {
    async fn search_posts_by_text(&self, query: &str) -> anyhow::Result<Vec<PostSummary>>;
}

#[async_trait]
impl PostSearch for PgPool {
    async fn search_posts_by_text(&self, query: &str) -> anyhow::Result<Vec<PostSummary>> {
        let rows = repo::posts::search_posts(self, query)
            .await
            .context("post text search failed")?;
        Ok(rows
            .into_iter()
            .map(|row| PostSummary {
                id: row.id,
                title: row.title,
                movie_title: row.movie_title,
            })
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct DuplicateDetector<S> {
    search: S,
    max_distance: usize,
}

impl<S: PostSearch> DuplicateDetector<S> {
    pub fn new(search: S) -> Self {
        Self {
            search,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Existing posts whose normalized movie title is within `max_distance`
    /// edits of `candidate`, closest first. Ties keep the search order.
    ///
    /// Never fails: an empty or over-long title short-circuits without
    /// searching and a search error is logged and reported as "no duplicates".
    pub async fn check(&self, candidate: &str) -> Vec<DuplicateCandidate> {
        let normalized = normalize_movie_title(candidate);
        if normalized.is_empty() {
            return Vec::new();
        }
        let normalized_len = normalized.chars().count();
        if normalized_len > MAX_TITLE_CHARS {
            debug!(chars = normalized_len, "duplicate check skipped for over-long title");
            return Vec::new();
        }

        let posts = match self.search.search_posts_by_text(&normalized).await {
            Ok(posts) => posts,
            Err(err) => {
                warn!(error = ?err, title = %candidate, "duplicate check search failed");
                return Vec::new();
            }
        };
        let searched = posts.len();

        let mut candidates: Vec<DuplicateCandidate> = posts
            .into_iter()
            .filter_map(|post| {
                let movie_title = normalize_movie_title(&post.movie_title);
                // The length gap is a lower bound on the distance.
                if movie_title.chars().count().abs_diff(normalized_len) > self.max_distance {
                    return None;
                }
                let distance = levenshtein_distance(&movie_title, &normalized);
                (distance <= self.max_distance).then_some(DuplicateCandidate { post, distance })
            })
            .collect();
        candidates.sort_by_key(|candidate| candidate.distance);

        debug!(
            title = %normalized,
            searched,
            matched = candidates.len(),
            "duplicate check finished"
        );

        candidates
    }
}

/// The candidate a caller should surface as its warning.
pub fn best_match(candidates: &[DuplicateCandidate]) -> Option<&DuplicateCandidate> {
    candidates.first()
}

/// Runs `check` under a caller-side deadline. Expiry counts as "no duplicates".
pub async fn check_with_timeout<S: PostSearch>(
    detector: &DuplicateDetector<S>,
    candidate: &str,
    timeout: Duration,
) -> Vec<DuplicateCandidate> {
    match tokio::time::timeout(timeout, detector.check(candidate)).await {
        Ok(candidates) => candidates,
        Err(_) => {
            warn!(
                title = %candidate,
                timeout_ms = timeout.as_millis() as u64,
                "duplicate check timed out"
            );
            Vec::new()
        }
    }
}
