use super::profile::UserProfile;
use crate::domain::blog::errors::DomainError;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// Side lookup for user display data. Unknown ids are simply absent from
/// the result; the caller renders those references without a profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, DomainError>;
    async fn find_profiles(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, UserProfile>, DomainError>;
}
