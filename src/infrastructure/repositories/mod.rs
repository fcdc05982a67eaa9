pub mod sqlx_blog_repository;
pub mod sqlx_user_directory;
