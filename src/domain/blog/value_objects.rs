use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentText {
    #[validate(length(min = 1, max = 1000))]
    pub value: String,
}

impl CommentText {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let text = Self {
            value: value.trim().to_string(),
        };
        text.validate()?;
        Ok(text)
    }
}
