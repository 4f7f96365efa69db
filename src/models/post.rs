use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Community forum post. Comments hang off it, replies hang off comments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post together with how many comments it has.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct PostStats {
    #[sqlx(flatten)]
    pub post: Post,
    pub comments: i64,
}
