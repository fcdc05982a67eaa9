use super::{
    handlers::{auth, blogs, health, users},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Blogs
        .route(
            "/api/blogs",
            get(blogs::list_blogs).post(blogs::create_blog),
        )
        .route(
            "/api/blogs/{id}",
            get(blogs::get_blog)
                .put(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
        // Social
        .route("/api/blogs/{id}/like", put(blogs::like_blog))
        .route("/api/blogs/{id}/comments", post(blogs::add_comment))
        .route(
            "/api/blogs/{id}/comments/{comment_id}",
            axum::routing::delete(blogs::delete_comment),
        )
        // Users
        .route("/api/users/profile", put(users::update_profile))
        .route("/api/users/{id}", get(users::get_user))
        .route("/api/users/{id}/blogs", get(users::get_user_blogs))
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
