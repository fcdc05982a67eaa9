use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public display fields for a user, attached to author and commenter
/// references in responses. Never used for authorization decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub profile_picture: String,
    pub bio: Option<String>,
}
