use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Core domain aggregate representing a blog post.
///
/// A blog owns its social state (likes, comments, view count) as embedded
/// data rather than as independent entities. Every mutation loads the whole
/// aggregate, applies one transition in memory, and persists the whole
/// aggregate back.
///
/// # Invariants
/// - `author` is set once at creation and never reassigned
/// - `likes` contains each user id at most once, most recent first
/// - every comment id is unique within `comments`
/// - `view_count` only increases, and only on a public fetch of a
///   published blog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    /// Unique identifier, assigned at creation
    pub id: Uuid,

    /// Post title, stored with surrounding whitespace trimmed
    pub title: String,

    /// Full post body
    pub content: String,

    /// Short teaser shown in listings
    pub summary: String,

    /// Optional cover image URI, empty string when absent
    pub cover_image: String,

    /// Owning user; only this identity may update or delete the post
    pub author: Uuid,

    /// Free-form topic tags, each trimmed
    pub tags: Vec<String>,

    /// Publication state controlling public visibility
    pub status: BlogStatus,

    /// Number of public single-item fetches of this post
    pub view_count: i64,

    /// User ids that currently like this post, most recent first
    pub likes: Vec<Uuid>,

    /// Embedded comments, most recent first
    pub comments: Vec<Comment>,

    /// Set by the store on insert
    pub created_at: DateTime<Utc>,

    /// Maintained by the store on every write
    pub updated_at: DateTime<Utc>,
}

/// A comment embedded in its parent blog. Comments have no lifecycle of
/// their own; they are addressed by id within the parent's comment list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique within the parent blog's comment list
    pub id: Uuid,

    /// Commenting user; only this identity may remove the comment
    pub user: Uuid,

    pub text: String,

    /// Creation timestamp, immutable
    pub date: DateTime<Utc>,
}

/// Publication state of a blog post.
///
/// Drafts are invisible to every public read operation; to a reader they
/// are indistinguishable from posts that do not exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, Default, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    #[default]
    Published,
}

impl BlogStatus {
    pub fn is_public(&self) -> bool {
        matches!(self, BlogStatus::Published)
    }
}

/// Fields accepted when creating a new blog post.
#[derive(Debug, Clone, Default)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<BlogStatus>,
}

/// Partial update where presence is signalled by a non-empty value.
///
/// An empty string or empty list leaves the stored field unchanged, so a
/// client cannot clear a field through this shape.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<BlogStatus>,
}

impl Blog {
    /// Builds a new aggregate owned by `author`. Timestamps are
    /// provisional until the store assigns them on insert.
    pub fn new(author: Uuid, input: NewBlog) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title.trim().to_string(),
            content: input.content,
            summary: input.summary,
            cover_image: input.cover_image.unwrap_or_default(),
            author,
            tags: trim_tags(input.tags.unwrap_or_default()),
            status: input.status.unwrap_or_default(),
            view_count: 0,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status.is_public()
    }

    pub fn is_authored_by(&self, user: Uuid) -> bool {
        self.author == user
    }

    /// Counts one public fetch of this post.
    pub fn record_view(&mut self) {
        self.view_count += 1;
    }

    /// Applies a partial update. Empty incoming values are treated as
    /// absent and leave the stored field untouched.
    pub fn apply(&mut self, patch: BlogPatch) {
        if let Some(title) = non_empty(patch.title) {
            self.title = title.trim().to_string();
        }
        if let Some(content) = non_empty(patch.content) {
            self.content = content;
        }
        if let Some(summary) = non_empty(patch.summary) {
            self.summary = summary;
        }
        if let Some(cover_image) = non_empty(patch.cover_image) {
            self.cover_image = cover_image;
        }
        if let Some(tags) = patch.tags.filter(|t| !t.is_empty()) {
            self.tags = trim_tags(tags);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    /// Flips `user`'s membership in the like set. Returns `true` when the
    /// post is liked after the call.
    pub fn toggle_like(&mut self, user: Uuid) -> bool {
        if self.likes.contains(&user) {
            self.likes.retain(|liker| *liker != user);
            false
        } else {
            self.likes.insert(0, user);
            true
        }
    }

    /// Prepends a comment by `user` and returns its generated id.
    pub fn add_comment(&mut self, user: Uuid, text: String) -> Uuid {
        let comment = Comment {
            id: Uuid::now_v7(),
            user,
            text,
            date: Utc::now(),
        };
        let id = comment.id;
        self.comments.insert(0, comment);
        id
    }

    pub fn comment(&self, id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Removes exactly the comment with `id`, if present.
    pub fn remove_comment(&mut self, id: Uuid) {
        self.comments.retain(|c| c.id != id);
    }
}

fn trim_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().map(|t| t.trim().to_string()).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
