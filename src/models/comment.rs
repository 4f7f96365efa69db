use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a course, a blog or a forum post, or a reply to a forum
/// comment. `parent_id` points at whatever it hangs off.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i32,
    pub parent_id: i32,
    pub user_id: i32,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Where a comment lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentThread {
    Course,
    Blog,
    /// forum comment on a post
    Post,
    /// reply to a forum comment
    Reply,
}

impl CommentThread {
    pub fn table(&self) -> &'static str {
        match self {
            CommentThread::Course => "course_comment",
            CommentThread::Blog => "blog_comment",
            CommentThread::Post => "post_comment",
            CommentThread::Reply => "comment_reply",
        }
    }

    pub fn parent_column(&self) -> &'static str {
        match self {
            CommentThread::Course => "course_id",
            CommentThread::Blog => "blog_id",
            CommentThread::Post => "post_id",
            CommentThread::Reply => "comment_id",
        }
    }
}
