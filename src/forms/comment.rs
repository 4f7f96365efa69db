use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct CommentForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 5000)]
    pub content: String,
}
