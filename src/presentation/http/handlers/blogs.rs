use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use uuid::Uuid;

use crate::application::blogs::dto::{
    AddCommentRequest, BlogView, CommentView, CreateBlogRequest, DeleteConfirmation,
    UpdateBlogRequest,
};
use crate::domain::blog::entity::Blog;
use crate::domain::blog::value_objects::CommentText;
use crate::presentation::http::{
    errors::AppError,
    middleware::user::{UserClaims, decode_required_user_claims},
    state::AppState,
};

/// A malformed id is reported exactly like a missing blog. Readers see
/// the same 404 for a bad id, an absent post, and someone else's draft.
fn parse_blog_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Blog not found".into()))
}

fn actor_id(claims: &UserClaims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthenticated)
}

pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogView>>, AppError> {
    let blogs = state.blogs.list_published().await?;
    Ok(Json(blogs))
}

pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogView>, AppError> {
    let id = parse_blog_id(&id)?;
    let blog = state.blogs.fetch_by_id(id).await?;
    Ok(Json(blog))
}

pub async fn create_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateBlogRequest>,
) -> Result<Json<Blog>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let actor = actor_id(&claims)?;
    let blog = state.blogs.create(actor, body).await?;
    Ok(Json(blog))
}

pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UpdateBlogRequest>,
) -> Result<Json<Blog>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let actor = actor_id(&claims)?;
    let id = parse_blog_id(&id)?;
    let blog = state.blogs.update(actor, id, body).await?;
    Ok(Json(blog))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteConfirmation>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let actor = actor_id(&claims)?;
    let id = parse_blog_id(&id)?;
    let confirmation = state.blogs.delete(actor, id).await?;
    Ok(Json(confirmation))
}

pub async fn like_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<Uuid>>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let actor = actor_id(&claims)?;
    let id = parse_blog_id(&id)?;
    let likes = state.blogs.toggle_like(actor, id).await?;
    Ok(Json(likes))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<AddCommentRequest>,
) -> Result<Json<Vec<CommentView>>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let actor = actor_id(&claims)?;
    let id = parse_blog_id(&id)?;
    let text = CommentText::new(body.text)
        .map_err(|_| AppError::BadRequest("Comment text is required".into()))?;
    let comments = state.blogs.add_comment(actor, id, text).await?;
    Ok(Json(comments))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Vec<CommentView>>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let actor = actor_id(&claims)?;
    let id = parse_blog_id(&id)?;
    let comment_id = Uuid::parse_str(&comment_id)
        .map_err(|_| AppError::NotFound("Comment not found".into()))?;
    let comments = state.blogs.delete_comment(actor, id, comment_id).await?;
    Ok(Json(comments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_blog_id_reads_as_not_found() {
        let err = parse_blog_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
