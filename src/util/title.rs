/// Fallback post title when no movie title is known.
pub const DEFAULT_POST_TITLE: &str = "Movie Discussion";

/// Longest title, in chars, accepted for a post or compared for duplicates.
pub const MAX_TITLE_CHARS: usize = 500;

/// Normalize a movie title for duplicate comparison: lowercase, drop every
/// character that is not a letter, digit or whitespace, collapse whitespace
/// runs to a single space and trim.
///
/// Punctuation is deleted rather than replaced, so `"Spider-Man"` becomes
/// `"spiderman"`. The result is only meant for comparison, never for display.
pub fn normalize_movie_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut kept = String::with_capacity(lowered.len());

    for ch in lowered.chars() {
        if ch.is_alphanumeric() || ch.is_whitespace() {
            kept.push(ch);
        }
    }

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Default display title for a new discussion post.
pub fn generate_post_title(movie_title: &str) -> String {
    let movie_title = movie_title.trim();
    if movie_title.is_empty() {
        return DEFAULT_POST_TITLE.to_string();
    }
    format!("{movie_title} - First Impressions")
}
