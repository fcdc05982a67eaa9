use super::entity::Blog;
use super::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Durable store for whole blog aggregates.
///
/// The store treats a blog as a single document: `save` overwrites the
/// entire aggregate (last writer wins), and single-document atomicity is
/// the only consistency guarantee callers may rely on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, blog: &Blog) -> Result<Blog, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, DomainError>;
    /// All published blogs, newest first.
    async fn find_published(&self) -> Result<Vec<Blog>, DomainError>;
    /// Published blogs by `author`, newest first.
    async fn find_by_author(&self, author: Uuid) -> Result<Vec<Blog>, DomainError>;
    /// Overwrites the stored aggregate with `blog`.
    async fn save(&self, blog: &Blog) -> Result<Blog, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
