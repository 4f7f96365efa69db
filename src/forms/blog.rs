use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct BlogForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub title: String,
    #[validate(min_length = 1)]
    pub content: String,
    #[validate(max_length = 100)]
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    /// shown as the byline; the admin's email when absent
    #[validate(max_length = 255)]
    pub author: Option<String>,
}

impl BlogForm {
    pub fn update(self, blog: &mut models::Blog) {
        blog.title = self.title;
        blog.content = self.content;
        blog.category = self.category;
        blog.thumbnail = self.thumbnail;
        if let Some(author) = self.author {
            blog.author = author;
        }
    }
}
