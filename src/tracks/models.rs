use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A music track; addressed by its position in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Track {
    #[validate(length(min = 1, message = "title must not be empty"))]
    #[schema(example = "Blue in Green")]
    pub title: String,
    #[validate(length(min = 1, message = "artist must not be empty"))]
    #[schema(example = "Miles Davis")]
    pub artist: String,
    /// Duration in seconds
    #[schema(example = 337)]
    pub duration: u32,
}

/// Acknowledgement returned by track mutations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Track added successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
