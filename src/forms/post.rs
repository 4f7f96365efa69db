use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct PostForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub title: String,
    #[validate(min_length = 1)]
    pub content: String,
}

impl PostForm {
    pub fn update(self, post: &mut models::Post) {
        post.title = self.title;
        post.content = self.content;
    }
}
