use crate::domain::blog::{
    entity::{Blog, BlogStatus, Comment},
    errors::DomainError,
    repository::BlogRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

/// Stores each blog aggregate as a single row: scalar columns for the
/// content fields, JSONB for the embedded like and comment collections.
/// A whole-row UPDATE is the unit of atomicity, matching the aggregate's
/// read-modify-write contract.
pub struct SqlxBlogRepository {
    pub pool: PgPool,
}

impl SqlxBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: Uuid,
    title: String,
    content: String,
    summary: String,
    cover_image: String,
    author: Uuid,
    tags: Vec<String>,
    status: BlogStatus,
    view_count: i64,
    likes: Json<Vec<Uuid>>,
    comments: Json<Vec<Comment>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BlogRow> for Blog {
    fn from(row: BlogRow) -> Self {
        Blog {
            id: row.id,
            title: row.title,
            content: row.content,
            summary: row.summary,
            cover_image: row.cover_image,
            author: row.author,
            tags: row.tags,
            status: row.status,
            view_count: row.view_count,
            likes: row.likes.0,
            comments: row.comments.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const BLOG_COLUMNS: &str = "id, title, content, summary, cover_image, author, tags, status, \
     view_count, likes, comments, created_at, updated_at";

fn infra(e: sqlx::Error) -> DomainError {
    DomainError::InfrastructureError(e.to_string())
}

#[async_trait]
impl BlogRepository for SqlxBlogRepository {
    async fn create(&self, blog: &Blog) -> Result<Blog, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            "INSERT INTO blogs (id, title, content, summary, cover_image, author, tags, status, \
                                view_count, likes, comments) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(blog.id)
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(&blog.summary)
        .bind(&blog.cover_image)
        .bind(blog.author)
        .bind(&blog.tags)
        .bind(blog.status)
        .bind(blog.view_count)
        .bind(Json(&blog.likes))
        .bind(Json(&blog.comments))
        .fetch_one(&self.pool)
        .await
        .map_err(infra)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        Ok(row.map(Blog::from))
    }

    async fn find_published(&self) -> Result<Vec<Blog>, DomainError> {
        let rows = sqlx::query_as::<_, BlogRow>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs \
             WHERE status = 'published' \
             ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        Ok(rows.into_iter().map(Blog::from).collect())
    }

    async fn find_by_author(&self, author: Uuid) -> Result<Vec<Blog>, DomainError> {
        let rows = sqlx::query_as::<_, BlogRow>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs \
             WHERE author = $1 AND status = 'published' \
             ORDER BY created_at DESC"
        ))
        .bind(author)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        Ok(rows.into_iter().map(Blog::from).collect())
    }

    async fn save(&self, blog: &Blog) -> Result<Blog, DomainError> {
        // author is deliberately not part of the SET list: ownership is
        // write-once at the storage layer as well.
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            "UPDATE blogs SET title = $2, content = $3, summary = $4, cover_image = $5, \
                              tags = $6, status = $7, view_count = $8, likes = $9, \
                              comments = $10, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(blog.id)
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(&blog.summary)
        .bind(&blog.cover_image)
        .bind(&blog.tags)
        .bind(blog.status)
        .bind(blog.view_count)
        .bind(Json(&blog.likes))
        .bind(Json(&blog.comments))
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?
        .ok_or_else(|| DomainError::NotFound("Blog".into()))?;
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Blog".into()));
        }
        Ok(())
    }
}
