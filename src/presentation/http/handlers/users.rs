use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use uuid::Uuid;

use crate::application::blogs::dto::BlogView;
use crate::domain::user::profile::UserProfile;
use crate::presentation::http::{
    errors::AppError, middleware::user::decode_required_user_claims, state::AppState,
};
use serde::Deserialize;

fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("User not found".into()))
}

/// Public profile lookup. The password hash never leaves the directory.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let id = parse_user_id(&id)?;
    let profile = state
        .users
        .find_profile(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(profile))
}

/// Published blogs by one author, newest first.
pub async fn get_user_blogs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<BlogView>>, AppError> {
    let id = parse_user_id(&id)?;
    let blogs = state.blogs.list_by_author(id).await?;
    Ok(Json(blogs))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
}

/// Presence-based partial update of the caller's own profile; empty
/// incoming values leave the stored field unchanged.
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthenticated)?;

    let username = body.username.filter(|s| !s.trim().is_empty());
    let bio = body.bio.filter(|s| !s.trim().is_empty());
    let profile_picture = body.profile_picture.filter(|s| !s.trim().is_empty());

    let profile = sqlx::query_as::<_, (Uuid, String, String, Option<String>)>(
        "UPDATE users SET username = COALESCE($2, username), \
                          bio = COALESCE($3, bio), \
                          profile_picture = COALESCE($4, profile_picture), \
                          updated_at = NOW() \
         WHERE id = $1 \
         RETURNING id, username, profile_picture, bio",
    )
    .bind(id)
    .bind(username)
    .bind(bio)
    .bind(profile_picture)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let (id, username, profile_picture, bio) = profile;
    Ok(Json(UserProfile {
        id,
        username,
        profile_picture,
        bio,
    }))
}
