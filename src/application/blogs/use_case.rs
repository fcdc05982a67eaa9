use super::dto::{
    BlogView, CommentView, CreateBlogRequest, DeleteConfirmation, UpdateBlogRequest,
};
use crate::domain::blog::entity::Blog;
use crate::domain::blog::errors::DomainError;
use crate::domain::blog::repository::BlogRepository;
use crate::domain::blog::value_objects::CommentText;
use crate::domain::user::directory::UserDirectory;
use std::sync::Arc;
use uuid::Uuid;

/// Application service owning the blog aggregate's lifecycle.
///
/// Every operation is a single-aggregate transaction: load, apply one
/// in-memory transition, persist the whole aggregate back. Authorization
/// is enforced here, never in the store.
pub struct BlogUseCase {
    blogs: Box<dyn BlogRepository>,
    users: Arc<dyn UserDirectory>,
}

impl BlogUseCase {
    pub fn new(blogs: Box<dyn BlogRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self { blogs, users }
    }

    /// All published blogs, newest first, with author display data.
    pub async fn list_published(&self) -> Result<Vec<BlogView>, DomainError> {
        let blogs = self.blogs.find_published().await?;
        self.render_list(blogs).await
    }

    /// A single published blog. Drafts and missing ids are both reported
    /// as not-found so a reader cannot probe for hidden posts. Counts the
    /// view and persists the increment before responding.
    pub async fn fetch_by_id(&self, id: Uuid) -> Result<BlogView, DomainError> {
        let mut blog = self.load(id).await?;
        if !blog.is_published() {
            return Err(DomainError::NotFound("Blog".into()));
        }

        blog.record_view();
        let blog = self.blogs.save(&blog).await?;

        let mut ids: Vec<Uuid> = blog.comments.iter().map(|c| c.user).collect();
        ids.push(blog.author);
        let profiles = self.users.find_profiles(&ids).await?;
        Ok(BlogView::from_blog(blog, &profiles))
    }

    /// Published blogs by `author`, newest first.
    pub async fn list_by_author(&self, author: Uuid) -> Result<Vec<BlogView>, DomainError> {
        let blogs = self.blogs.find_by_author(author).await?;
        self.render_list(blogs).await
    }

    /// Creates a blog owned by `actor`. The creator sees the full
    /// aggregate regardless of its publication status.
    pub async fn create(
        &self,
        actor: Uuid,
        request: CreateBlogRequest,
    ) -> Result<Blog, DomainError> {
        let blog = Blog::new(actor, request.into());
        self.blogs.create(&blog).await
    }

    /// Partial update, author only. Empty incoming values leave the
    /// stored field unchanged.
    pub async fn update(
        &self,
        actor: Uuid,
        id: Uuid,
        request: UpdateBlogRequest,
    ) -> Result<Blog, DomainError> {
        let mut blog = self.load_owned(id, actor).await?;
        blog.apply(request.into());
        self.blogs.save(&blog).await
    }

    /// Removes the aggregate, embedded comments and likes included.
    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<DeleteConfirmation, DomainError> {
        self.load_owned(id, actor).await?;
        self.blogs.delete(id).await?;
        Ok(DeleteConfirmation {
            message: "Blog removed".to_string(),
        })
    }

    /// Flips `actor`'s like on any existing blog, the actor's own
    /// included, and returns the resulting like sequence.
    pub async fn toggle_like(&self, actor: Uuid, id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let mut blog = self.load(id).await?;
        blog.toggle_like(actor);
        let blog = self.blogs.save(&blog).await?;
        Ok(blog.likes)
    }

    /// Prepends a comment by `actor` and returns the full updated
    /// sequence with commenter display data.
    pub async fn add_comment(
        &self,
        actor: Uuid,
        id: Uuid,
        text: CommentText,
    ) -> Result<Vec<CommentView>, DomainError> {
        let mut blog = self.load(id).await?;
        blog.add_comment(actor, text.value);
        let blog = self.blogs.save(&blog).await?;
        self.render_comments(&blog).await
    }

    /// Removes one comment by id. Only the comment's own author may
    /// remove it; the blog's author holds no special power here.
    pub async fn delete_comment(
        &self,
        actor: Uuid,
        id: Uuid,
        comment_id: Uuid,
    ) -> Result<Vec<CommentView>, DomainError> {
        let mut blog = self.load(id).await?;
        let comment = blog
            .comment(comment_id)
            .ok_or_else(|| DomainError::NotFound("Comment".into()))?;
        if comment.user != actor {
            return Err(DomainError::Unauthorized);
        }

        blog.remove_comment(comment_id);
        let blog = self.blogs.save(&blog).await?;
        self.render_comments(&blog).await
    }

    async fn load(&self, id: Uuid) -> Result<Blog, DomainError> {
        self.blogs
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Blog".into()))
    }

    async fn load_owned(&self, id: Uuid, actor: Uuid) -> Result<Blog, DomainError> {
        let blog = self.load(id).await?;
        if !blog.is_authored_by(actor) {
            return Err(DomainError::Unauthorized);
        }
        Ok(blog)
    }

    async fn render_list(&self, blogs: Vec<Blog>) -> Result<Vec<BlogView>, DomainError> {
        let authors: Vec<Uuid> = blogs.iter().map(|b| b.author).collect();
        let profiles = self.users.find_profiles(&authors).await?;
        Ok(blogs
            .into_iter()
            .map(|b| BlogView::from_blog(b, &profiles))
            .collect())
    }

    async fn render_comments(&self, blog: &Blog) -> Result<Vec<CommentView>, DomainError> {
        let ids: Vec<Uuid> = blog.comments.iter().map(|c| c.user).collect();
        let profiles = self.users.find_profiles(&ids).await?;
        Ok(blog
            .comments
            .iter()
            .map(|c| CommentView::from_comment(c, &profiles))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blog::entity::{BlogStatus, NewBlog};
    use crate::domain::blog::repository::MockBlogRepository;
    use crate::domain::user::directory::MockUserDirectory;
    use crate::domain::user::profile::UserProfile;
    use super::super::dto::UserRef;
    use mockall::predicate::eq;
    use std::collections::HashMap;

    fn published_blog(author: Uuid) -> Blog {
        Blog::new(
            author,
            NewBlog {
                title: "Post".to_string(),
                content: "Body".to_string(),
                summary: "Sum".to_string(),
                ..Default::default()
            },
        )
    }

    fn draft_blog(author: Uuid) -> Blog {
        let mut blog = published_blog(author);
        blog.status = BlogStatus::Draft;
        blog
    }

    fn empty_directory() -> MockUserDirectory {
        let mut users = MockUserDirectory::new();
        users
            .expect_find_profiles()
            .returning(|_| Ok(HashMap::new()));
        users
    }

    fn directory_with(profile: UserProfile) -> MockUserDirectory {
        let mut users = MockUserDirectory::new();
        users.expect_find_profiles().returning(move |_| {
            let mut map = HashMap::new();
            map.insert(profile.id, profile.clone());
            Ok(map)
        });
        users
    }

    #[tokio::test]
    async fn fetch_by_id_hides_drafts_as_not_found() {
        let author = Uuid::now_v7();
        let blog = draft_blog(author);
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(blog.clone())));
        repo.expect_save().never();

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let err = service.fetch_by_id(id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn fetch_by_id_persists_the_view_increment() {
        let author = Uuid::now_v7();
        let blog = published_blog(author);
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        let loaded = blog.clone();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(loaded.clone())));
        repo.expect_save()
            .withf(|b: &Blog| b.view_count == 1)
            .returning(|b| Ok(b.clone()));

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let view = service.fetch_by_id(id).await.unwrap();
        assert_eq!(view.view_count, 1);
    }

    #[tokio::test]
    async fn fetch_by_id_attaches_author_profile() {
        let author = Uuid::now_v7();
        let blog = published_blog(author);
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        let loaded = blog.clone();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(loaded.clone())));
        repo.expect_save().returning(|b| Ok(b.clone()));

        let profile = UserProfile {
            id: author,
            username: "ada".to_string(),
            profile_picture: String::new(),
            bio: None,
        };
        let service = BlogUseCase::new(Box::new(repo), Arc::new(directory_with(profile)));
        let view = service.fetch_by_id(id).await.unwrap();
        match view.author {
            UserRef::Resolved(p) => assert_eq!(p.username, "ada"),
            UserRef::Id(_) => panic!("author profile should resolve"),
        }
    }

    #[tokio::test]
    async fn update_rejects_non_author_with_unauthorized() {
        let author = Uuid::now_v7();
        let stranger = Uuid::now_v7();
        let blog = published_blog(author);
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(blog.clone())));
        repo.expect_save().never();

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let err = service
            .update(stranger, id, UpdateBlogRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[tokio::test]
    async fn update_reports_missing_blog_as_not_found() {
        let mut repo = MockBlogRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let err = service
            .update(Uuid::now_v7(), Uuid::now_v7(), UpdateBlogRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_allows_author_to_publish_a_draft() {
        let author = Uuid::now_v7();
        let blog = draft_blog(author);
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(blog.clone())));
        repo.expect_save()
            .withf(|b: &Blog| b.status == BlogStatus::Published)
            .returning(|b| Ok(b.clone()));

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let updated = service
            .update(
                author,
                id,
                UpdateBlogRequest {
                    status: Some(BlogStatus::Published),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_published());
    }

    #[tokio::test]
    async fn delete_requires_the_author() {
        let author = Uuid::now_v7();
        let blog = published_blog(author);
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(blog.clone())));
        repo.expect_delete().never();

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let err = service.delete(Uuid::now_v7(), id).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[tokio::test]
    async fn delete_removes_the_aggregate() {
        let author = Uuid::now_v7();
        let blog = published_blog(author);
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(blog.clone())));
        repo.expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(()));

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let confirmation = service.delete(author, id).await.unwrap();
        assert_eq!(confirmation.message, "Blog removed");
    }

    #[tokio::test]
    async fn toggle_like_works_on_someone_elses_draft() {
        let author = Uuid::now_v7();
        let reader = Uuid::now_v7();
        let blog = draft_blog(author);
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(blog.clone())));
        repo.expect_save().returning(|b| Ok(b.clone()));

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let likes = service.toggle_like(reader, id).await.unwrap();
        assert_eq!(likes, vec![reader]);
    }

    #[tokio::test]
    async fn add_comment_returns_the_updated_sequence() {
        let author = Uuid::now_v7();
        let commenter = Uuid::now_v7();
        let blog = published_blog(author);
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(blog.clone())));
        repo.expect_save().returning(|b| Ok(b.clone()));

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let text = CommentText::new("nice".to_string()).unwrap();
        let comments = service.add_comment(commenter, id, text).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "nice");
    }

    #[tokio::test]
    async fn delete_comment_enforces_comment_ownership() {
        let author = Uuid::now_v7();
        let commenter = Uuid::now_v7();
        let mut blog = published_blog(author);
        let comment_id = blog.add_comment(commenter, "mine".to_string());
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        let loaded = blog.clone();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(loaded.clone())));
        repo.expect_save().never();

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        // the blog's author still may not remove someone else's comment
        let err = service
            .delete_comment(author, id, comment_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[tokio::test]
    async fn delete_comment_distinguishes_missing_comment() {
        let author = Uuid::now_v7();
        let blog = published_blog(author);
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(blog.clone())));

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let err = service
            .delete_comment(author, id, Uuid::now_v7())
            .await
            .unwrap_err();
        match err {
            DomainError::NotFound(what) => assert_eq!(what, "Comment"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_comment_by_its_author_removes_it() {
        let author = Uuid::now_v7();
        let commenter = Uuid::now_v7();
        let mut blog = published_blog(author);
        let comment_id = blog.add_comment(commenter, "mine".to_string());
        let id = blog.id;

        let mut repo = MockBlogRepository::new();
        let loaded = blog.clone();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(loaded.clone())));
        repo.expect_save()
            .withf(|b: &Blog| b.comments.is_empty())
            .returning(|b| Ok(b.clone()));

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let comments = service
            .delete_comment(commenter, id, comment_id)
            .await
            .unwrap();
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn create_binds_the_acting_identity_as_author() {
        let actor = Uuid::now_v7();

        let mut repo = MockBlogRepository::new();
        repo.expect_create()
            .withf(move |b: &Blog| b.author == actor)
            .returning(|b| Ok(b.clone()));

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let blog = service
            .create(
                actor,
                CreateBlogRequest {
                    title: "T".to_string(),
                    content: "C".to_string(),
                    summary: "S".to_string(),
                    cover_image: None,
                    tags: None,
                    status: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(blog.author, actor);
    }

    #[tokio::test]
    async fn list_published_never_calls_save() {
        let author = Uuid::now_v7();
        let blog = published_blog(author);

        let mut repo = MockBlogRepository::new();
        repo.expect_find_published()
            .returning(move || Ok(vec![blog.clone()]));
        repo.expect_save().never();

        let service = BlogUseCase::new(Box::new(repo), Arc::new(empty_directory()));
        let listed = service.list_published().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].view_count, 0);
    }
}
