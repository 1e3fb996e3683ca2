use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Words per minute assumed for the reading-time estimate.
const READING_WORDS_PER_MINUTE: usize = 200;

/// Publication lifecycle state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            other => Err(format!("unknown post status: {other}")),
        }
    }
}

/// Post entity - a blog entry owned by exactly one account.
///
/// The slug is assigned once at creation and stays put across title edits
/// so published URLs never break; changing it takes an explicit slug edit.
/// `owner_id` is set at construction and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub slug: String,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft with generated ID and timestamps.
    pub fn new(owner_id: Uuid, title: String, slug: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            slug,
            status: PostStatus::Draft,
            published_at: None,
            content,
            excerpt: None,
            featured_image: None,
            meta_title: None,
            meta_description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `Published` and stamp `published_at` with the current time.
    ///
    /// The stamp is unconditional: re-publishing an already published post
    /// refreshes the timestamp.
    pub fn publish(&mut self) {
        self.status = PostStatus::Published;
        self.published_at = Some(Utc::now());
        self.touch();
    }

    /// Back to `Draft`; the publication timestamp is cleared.
    pub fn unpublish(&mut self) {
        self.status = PostStatus::Draft;
        self.published_at = None;
        self.touch();
    }

    /// Move to `Archived`. `published_at` keeps whatever value it had.
    pub fn archive(&mut self) {
        self.status = PostStatus::Archived;
        self.touch();
    }

    /// The single visibility predicate for public listings and reads.
    ///
    /// A published post with a future `published_at` is scheduled and not
    /// yet visible.
    pub fn is_visible(&self, as_of: DateTime<Utc>) -> bool {
        self.status == PostStatus::Published
            && self.published_at.is_some_and(|at| at <= as_of)
    }

    /// Ownership check - the sole edit/delete authorization rule.
    pub fn can_edit(&self, account_id: Uuid) -> bool {
        self.owner_id == account_id
    }

    /// Estimated reading time in minutes, never less than one.
    pub fn reading_time(&self) -> u32 {
        let words = self.content.split_whitespace().count();
        (words.div_ceil(READING_WORDS_PER_MINUTE)).max(1) as u32
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn draft() -> Post {
        Post::new(
            Uuid::new_v4(),
            "State machine".to_string(),
            "state-machine".to_string(),
            "Some content.".to_string(),
        )
    }

    #[test]
    fn test_publish_sets_status_and_timestamp() {
        let mut post = draft();
        post.publish();

        assert_eq!(post.status, PostStatus::Published);
        assert!(post.published_at.is_some());
    }

    #[test]
    fn test_unpublish_clears_timestamp() {
        let mut post = draft();
        post.publish();
        post.unpublish();

        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.published_at, None);
    }

    #[test]
    fn test_archive_preserves_timestamp() {
        let mut post = draft();
        post.publish();
        let published_at = post.published_at;
        post.archive();

        assert_eq!(post.status, PostStatus::Archived);
        assert_eq!(post.published_at, published_at);
    }

    #[test]
    fn test_archive_from_draft_leaves_timestamp_unset() {
        let mut post = draft();
        post.archive();

        assert_eq!(post.status, PostStatus::Archived);
        assert_eq!(post.published_at, None);
    }

    #[test]
    fn test_republish_refreshes_timestamp() {
        let mut post = draft();
        post.publish();
        // Pretend the first publish happened an hour ago.
        let first = Utc::now() - TimeDelta::hours(1);
        post.published_at = Some(first);

        post.publish();

        assert!(post.published_at.unwrap() > first);
    }

    #[test]
    fn test_scheduled_post_is_not_visible_yet() {
        let mut post = draft();
        post.status = PostStatus::Published;
        post.published_at = Some(Utc::now() + TimeDelta::hours(2));

        assert!(!post.is_visible(Utc::now()));
        assert!(post.is_visible(Utc::now() + TimeDelta::hours(3)));
    }

    #[test]
    fn test_draft_and_archived_are_never_visible() {
        let mut post = draft();
        assert!(!post.is_visible(Utc::now()));

        post.publish();
        post.archive();
        assert!(!post.is_visible(Utc::now()));
    }

    #[test]
    fn test_can_edit_is_owner_only() {
        let post = draft();
        assert!(post.can_edit(post.owner_id));
        assert!(!post.can_edit(Uuid::new_v4()));
    }

    #[test]
    fn test_reading_time_rounds_up_with_floor_of_one() {
        let mut post = draft();
        post.content = "word ".repeat(400);
        assert_eq!(post.reading_time(), 2);

        post.content = "short".to_string();
        assert_eq!(post.reading_time(), 1);
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [PostStatus::Draft, PostStatus::Published, PostStatus::Archived] {
            assert_eq!(status.as_str().parse::<PostStatus>().unwrap(), status);
        }
        assert!("deleted".parse::<PostStatus>().is_err());
    }
}
