use crate::domain::blog::entity::{Blog, BlogPatch, BlogStatus, Comment, NewBlog};
use crate::domain::user::profile::UserProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<BlogStatus>,
}

impl From<CreateBlogRequest> for NewBlog {
    fn from(req: CreateBlogRequest) -> Self {
        NewBlog {
            title: req.title,
            content: req.content,
            summary: req.summary,
            cover_image: req.cover_image,
            tags: req.tags,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<BlogStatus>,
}

impl From<UpdateBlogRequest> for BlogPatch {
    fn from(req: UpdateBlogRequest) -> Self {
        BlogPatch {
            title: req.title,
            content: req.content,
            summary: req.summary,
            cover_image: req.cover_image,
            tags: req.tags,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}

/// A user reference as it appears in responses: the resolved display
/// profile when the directory knows the id, otherwise the bare id.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UserRef {
    Resolved(UserProfile),
    Id(Uuid),
}

impl UserRef {
    fn resolve(id: Uuid, profiles: &HashMap<Uuid, UserProfile>) -> Self {
        match profiles.get(&id) {
            Some(profile) => UserRef::Resolved(profile.clone()),
            None => UserRef::Id(id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub user: UserRef,
    pub text: String,
    pub date: DateTime<Utc>,
}

impl CommentView {
    pub fn from_comment(comment: &Comment, profiles: &HashMap<Uuid, UserProfile>) -> Self {
        Self {
            id: comment.id,
            user: UserRef::resolve(comment.user, profiles),
            text: comment.text.clone(),
            date: comment.date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub cover_image: String,
    pub author: UserRef,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    pub view_count: i64,
    pub likes: Vec<Uuid>,
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogView {
    pub fn from_blog(blog: Blog, profiles: &HashMap<Uuid, UserProfile>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            summary: blog.summary,
            cover_image: blog.cover_image,
            author: UserRef::resolve(blog.author, profiles),
            tags: blog.tags,
            status: blog.status,
            view_count: blog.view_count,
            likes: blog.likes,
            comments: blog
                .comments
                .iter()
                .map(|c| CommentView::from_comment(c, profiles))
                .collect(),
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteConfirmation {
    pub message: String,
}
