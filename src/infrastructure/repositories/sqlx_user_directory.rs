use crate::domain::blog::errors::DomainError;
use crate::domain::user::{directory::UserDirectory, profile::UserProfile};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

pub struct SqlxUserDirectory {
    pub pool: PgPool,
}

impl SqlxUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    username: String,
    profile_picture: String,
    bio: Option<String>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        UserProfile {
            id: row.id,
            username: row.username,
            profile_picture: row.profile_picture,
            bio: row.bio,
        }
    }
}

#[async_trait]
impl UserDirectory for SqlxUserDirectory {
    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, username, profile_picture, bio FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(row.map(UserProfile::from))
    }

    async fn find_profiles(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, UserProfile>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, username, profile_picture, bio FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(rows
            .into_iter()
            .map(|row| (row.id, UserProfile::from(row)))
            .collect())
    }
}
